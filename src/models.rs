use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    pub id: i64,
    pub text: String,
}

/// A stored pairing as returned by `POST /api/combos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub id: i64,
    pub greeting_id: i64,
    pub audience_id: i64,
}

/// A combo joined with the current text of both sides, as listed by `GET /api/combos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboDetail {
    pub id: i64,
    pub greeting_id: i64,
    pub audience_id: i64,
    pub greeting_text: String,
    pub audience_text: String,
}

// Fields stay optional so a missing value reaches the NOT NULL constraint
// and comes back as a storage error, like any other insert failure.
// Scalars are coerced the way the column types would: numbers and booleans
// become text, numeric strings become ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewText {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCombo {
    #[serde(default, deserialize_with = "lenient_id")]
    pub greeting_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub audience_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Int(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
        Scalar::Text(text) => text,
    }))
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let invalid = |shown: String| de::Error::custom(format!("invalid input syntax for type integer: {shown}"));
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(id)) => Ok(Some(id)),
        Some(Scalar::Float(id)) if id.fract() == 0.0 && id.abs() < i64::MAX as f64 => Ok(Some(id as i64)),
        Some(Scalar::Float(id)) => Err(invalid(id.to_string())),
        Some(Scalar::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(format!("\"{text}\""))),
        Some(Scalar::Bool(flag)) => Err(invalid(flag.to_string())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
