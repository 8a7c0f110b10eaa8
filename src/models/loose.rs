//! Deserializadores tolerantes
//!
//! La API de despacho no es consistente con los tipos: los identificadores
//! llegan como texto o como número, los contadores a veces como texto.
//! Estos helpers aceptan lo razonable y tratan el resto como ausente.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Texto: acepta string o número; cualquier otro valor es `None`
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_text))
}

/// Número: solo acepta números JSON
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Booleano con la veracidad de JS: `1`, `"true"` o un objeto cuentan como
/// verdadero; `0`, `""`, `false` y `null` como falso
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(!is_falsy(value.as_ref()))
}

pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Un valor es "falso" al estilo JSON/JS: vacío, cero, false o null
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f == 0.0 || f.is_nan()).unwrap_or(false),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}
