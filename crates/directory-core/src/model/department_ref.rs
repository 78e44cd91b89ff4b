use serde::{Deserialize, Serialize};

use super::department::DepartmentId;

/// An employee's department membership
///
/// `Unassigned` is a tagged case, not a nullable id: the Unassigned bucket is
/// never a stored department, so it can be neither created nor deleted.
/// On the wire this maps to `departmentId: number | null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<DepartmentId>", into = "Option<DepartmentId>")]
pub enum DepartmentRef {
    /// Member of a stored department
    Assigned(DepartmentId),
    /// Member of the synthetic Unassigned bucket
    #[default]
    Unassigned,
}

impl DepartmentRef {
    /// The referenced department id, if any
    pub fn department_id(self) -> Option<DepartmentId> {
        match self {
            DepartmentRef::Assigned(id) => Some(id),
            DepartmentRef::Unassigned => None,
        }
    }

    /// Check if this is the Unassigned bucket
    pub fn is_unassigned(self) -> bool {
        matches!(self, DepartmentRef::Unassigned)
    }

    /// Check if this points at the given department
    pub fn is_department(self, id: DepartmentId) -> bool {
        self == DepartmentRef::Assigned(id)
    }
}

impl From<DepartmentId> for DepartmentRef {
    fn from(id: DepartmentId) -> Self {
        DepartmentRef::Assigned(id)
    }
}

impl From<Option<DepartmentId>> for DepartmentRef {
    fn from(id: Option<DepartmentId>) -> Self {
        id.map_or(DepartmentRef::Unassigned, DepartmentRef::Assigned)
    }
}

impl From<DepartmentRef> for Option<DepartmentId> {
    fn from(department: DepartmentRef) -> Self {
        department.department_id()
    }
}

impl std::fmt::Display for DepartmentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartmentRef::Assigned(id) => write!(f, "department {}", id),
            DepartmentRef::Unassigned => f.write_str("unassigned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unassigned() {
        assert!(DepartmentRef::default().is_unassigned());
        assert_eq!(DepartmentRef::default().department_id(), None);
    }

    #[test]
    fn test_option_round_trip() {
        let id = DepartmentId::new(4);
        assert_eq!(DepartmentRef::from(Some(id)), DepartmentRef::Assigned(id));
        assert_eq!(DepartmentRef::from(None), DepartmentRef::Unassigned);
        assert_eq!(Option::<DepartmentId>::from(DepartmentRef::Assigned(id)), Some(id));
    }

    #[test]
    fn test_serializes_as_nullable_id() {
        let assigned = serde_json::to_string(&DepartmentRef::Assigned(DepartmentId::new(7))).unwrap();
        let unassigned = serde_json::to_string(&DepartmentRef::Unassigned).unwrap();
        assert_eq!(assigned, "7");
        assert_eq!(unassigned, "null");

        let parsed: DepartmentRef = serde_json::from_str("null").unwrap();
        assert!(parsed.is_unassigned());
    }

    #[test]
    fn test_is_department() {
        let id = DepartmentId::new(1);
        assert!(DepartmentRef::Assigned(id).is_department(id));
        assert!(!DepartmentRef::Assigned(id).is_department(DepartmentId::new(2)));
        assert!(!DepartmentRef::Unassigned.is_department(id));
    }
}
