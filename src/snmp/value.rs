/// An owned copy of a varbind value, detached from the session buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    OctetString(Vec<u8>),
    Null,
    Counter32(u32),
    Gauge32(u32),
    TimeTicks(u32),
    Counter64(u64),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    Other(String),
}

impl Value {
    /// Numeric values as a signed integer, if they fit.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(v) => Some(v),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(v as i64),
            Value::Counter64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::OctetString(_) => "OCTET STRING",
            Value::Null => "NULL",
            Value::Counter32(_) => "Counter32",
            Value::Gauge32(_) => "Gauge32",
            Value::TimeTicks(_) => "TimeTicks",
            Value::Counter64(_) => "Counter64",
            Value::NoSuchObject => "noSuchObject",
            Value::NoSuchInstance => "noSuchInstance",
            Value::EndOfMibView => "endOfMibView",
            Value::Other(_) => "unsupported type",
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }
}

impl From<&snmp2::Value<'_>> for Value {
    fn from(value: &snmp2::Value<'_>) -> Self {
        match value {
            snmp2::Value::Integer(v) => Value::Integer(*v),
            snmp2::Value::OctetString(v) => Value::OctetString(v.to_vec()),
            snmp2::Value::Null => Value::Null,
            snmp2::Value::Counter32(v) => Value::Counter32(*v),
            snmp2::Value::Unsigned32(v) => Value::Gauge32(*v),
            snmp2::Value::Timeticks(v) => Value::TimeTicks(*v),
            snmp2::Value::Counter64(v) => Value::Counter64(*v),
            snmp2::Value::NoSuchObject => Value::NoSuchObject,
            snmp2::Value::NoSuchInstance => Value::NoSuchInstance,
            snmp2::Value::EndOfMibView => Value::EndOfMibView,
            other => Value::Other(format!("{other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_convert_to_i64() {
        assert_eq!(Value::from(&snmp2::Value::Integer(47)).as_i64(), Some(47));
        assert_eq!(Value::from(&snmp2::Value::Unsigned32(128)).as_i64(), Some(128));
        assert_eq!(Value::from(&snmp2::Value::Counter64(u64::MAX)).as_i64(), None);
    }

    #[test]
    fn strings_are_copied_out_of_the_buffer() {
        let raw = b"47".to_vec();
        let value = Value::from(&snmp2::Value::OctetString(&raw));
        drop(raw);
        assert_eq!(value, Value::OctetString(b"47".to_vec()));
        assert_eq!(value.as_i64(), None);
    }

    #[test]
    fn exceptions_are_flagged() {
        assert!(Value::from(&snmp2::Value::NoSuchInstance).is_exception());
        assert!(Value::from(&snmp2::Value::EndOfMibView).is_exception());
        assert!(!Value::from(&snmp2::Value::Null).is_exception());
    }
}
