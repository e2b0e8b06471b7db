use serde::{Deserialize, Serialize};

/// User role carried in session claims.
///
/// A closed enumeration: the backend's route table names exactly these three.
/// Wire names are the backend's (`"Guru"` = teacher, `"Siswa"` = student).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "Guru")]
    Teacher,
    #[serde(rename = "Siswa")]
    Student,
}

impl Role {
    /// The role name as it appears on the wire (claims, role-count keys).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Guru",
            Role::Student => "Siswa",
        }
    }

    pub fn from_wire(name: &str) -> Option<Role> {
        match name {
            "Admin" => Some(Role::Admin),
            "Guru" => Some(Role::Teacher),
            "Siswa" => Some(Role::Student),
            _ => None,
        }
    }

    /// Class management (create/edit/delete classes, materials, assignments,
    /// roster changes) is a teacher/admin capability.
    pub fn can_manage_classes(&self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }

    /// Only admins register new users.
    pub fn can_register_users(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        };
        f.write_str(label)
    }
}
