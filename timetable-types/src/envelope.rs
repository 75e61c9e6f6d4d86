//! List envelopes.
//!
//! Most list endpoints answer `{"data": [...]}`, a few answer a bare array.
//! [`ListResponse`] accepts either shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

impl<T> From<ListResponse<T>> for Vec<T> {
    fn from(resp: ListResponse<T>) -> Self {
        resp.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::Department;

    #[test]
    fn test_bare_array() {
        let resp: ListResponse<Department> =
            serde_json::from_str(r#"[{"id": "d1", "name": "Physics"}]"#).unwrap();
        assert_eq!(resp.into_vec().len(), 1);
    }

    #[test]
    fn test_data_envelope() {
        let resp: ListResponse<Department> = serde_json::from_str(
            r#"{"data": [{"id": "d1", "name": "Physics"}, {"id": "d2", "name": "Maths"}]}"#,
        )
        .unwrap();
        let depts: Vec<Department> = resp.into();
        assert_eq!(depts[1].name, "Maths");
    }

    #[test]
    fn test_empty_envelope() {
        let resp: ListResponse<Department> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(resp.into_vec().is_empty());
    }

    #[test]
    fn test_other_shapes_rejected() {
        assert!(serde_json::from_str::<ListResponse<Department>>(r#""nope""#).is_err());
    }
}
