//! Student and class entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{ClassRoom, Student};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the classes table.
#[derive(Debug, Clone, FromRow)]
pub struct ClassRoomEntity {
    pub id: Uuid,
    pub class_number: i32,
    pub section: String,
}

impl From<ClassRoomEntity> for ClassRoom {
    fn from(entity: ClassRoomEntity) -> Self {
        ClassRoom {
            id: entity.id,
            class_number: entity.class_number,
            section: entity.section,
        }
    }
}

/// Database row mapping for the students table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEntity {
    pub id: Uuid,
    pub student_code: String,
    pub name: String,
    pub dob: NaiveDate,
    pub class_id: Option<Uuid>,
    pub roll_number: i32,
    pub fathers_name: Option<String>,
    pub mothers_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StudentEntity> for Student {
    fn from(entity: StudentEntity) -> Self {
        Student {
            id: entity.id,
            student_code: entity.student_code,
            name: entity.name,
            dob: entity.dob,
            class_id: entity.class_id,
            roll_number: entity.roll_number,
            fathers_name: entity.fathers_name,
            mothers_name: entity.mothers_name,
            address: entity.address,
            email: entity.email,
            phone: entity.phone,
            bio: entity.bio,
            profile_photo: entity.profile_photo,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
