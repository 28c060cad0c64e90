use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Employee as exchanged over HTTP.
///
/// Zero-valued fields are left out of the rendered JSON, and an `id` sent by
/// the client is accepted but never trusted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Employee {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        serialize_with = "serialize_number",
        skip_serializing_if = "is_zero"
    )]
    pub salary: f64,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        serialize_with = "serialize_number",
        skip_serializing_if = "is_zero"
    )]
    pub age: f64,
}

/// Employee as stored in the `employees` collection.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EmployeeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: f64,
}

impl EmployeeDocument {
    /// Builds an unsaved document from a request payload, dropping any
    /// client supplied id.
    pub fn from_payload(employee: &Employee) -> Self {
        EmployeeDocument {
            id: None,
            name: employee.name.clone(),
            salary: employee.salary,
            age: employee.age,
        }
    }
}

impl From<EmployeeDocument> for Employee {
    fn from(doc: EmployeeDocument) -> Self {
        Employee {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: doc.name,
            salary: doc.salary,
            age: doc.age,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

// Integral values go out as JSON integers so `30` round-trips as `30`, not `30.0`.
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
