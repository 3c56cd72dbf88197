//! Valor neutral del pipeline.
//!
//! `Value` es la unidad que fluye entre etapas y la que queda almacenada en
//! el registro de memoización de cada nodo:
//! - `Null` es la semilla del pipeline y el marcador ausente/undefined.
//! - `Data` es JSON genérico escrito por el test; el core no interpreta su
//!   semántica.
//! - `Node` es un valor construido (comparación por identidad).
use std::fmt;

use super::Node;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Data(serde_json::Value),
    Node(Node),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Data(json) => Some(json),
            _ => None,
        }
    }

    /// Forma numérica del valor: hook del nodo o número JSON directo.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Data(json) => json.as_f64(),
            Value::Node(node) => node.to_number(),
        }
    }

    /// Etiqueta corta de la clase del valor (para mensajes de error).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Data(_) => "data",
            Value::Node(_) => "node",
        }
    }
}

/// Igualdad: `Null == Null`, `Data` por valor JSON, `Node` por identidad.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Data(json) => write!(f, "{}", json),
            Value::Node(node) => write!(f, "{}", node),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Data(json)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}
