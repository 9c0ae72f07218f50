//! crates/portal_core/src/profile.rs
//!
//! Profile editing: a draft copy of the student record and avatar encoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::domain::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Avatar,
    Name,
    Email,
    Phone,
    Dob,
}

impl ProfileField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "avatar" | "photo" | "picture" => Some(ProfileField::Avatar),
            "name" => Some(ProfileField::Name),
            "email" => Some(ProfileField::Email),
            "phone" => Some(ProfileField::Phone),
            "dob" | "birthday" => Some(ProfileField::Dob),
            _ => None,
        }
    }
}

/// An unsaved copy of the student record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    student: Student,
}

impl ProfileDraft {
    pub fn begin(student: &Student) -> Self {
        Self {
            student: student.clone(),
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::Avatar => &mut self.student.avatar,
            ProfileField::Name => &mut self.student.name,
            ProfileField::Email => &mut self.student.email,
            ProfileField::Phone => &mut self.student.phone,
            ProfileField::Dob => &mut self.student.dob,
        };
        *slot = value;
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn into_student(self) -> Student {
        self.student
    }
}

/// MIME type for an image file extension, if it is one the avatar accepts.
pub fn image_mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Embeds raw image bytes as a `data:` URI.
pub fn avatar_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
