//! Built-in descriptors

use crate::descriptor::SqlTypeDescriptor;
use crate::literal::{
    BooleanLiteralFormatter, CharacterLiteralFormatter, LiteralFormatter,
    TemporalLiteralFormatter,
};
use crate::types::{TemporalPrecision, TypeCode, ValueType};

/// Numeric and binary codes: literals use the value's plain text form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicDescriptor {
    type_code: TypeCode,
}

impl BasicDescriptor {
    pub fn new(type_code: TypeCode) -> Self {
        Self { type_code }
    }
}

impl SqlTypeDescriptor for BasicDescriptor {
    fn sql_type(&self) -> TypeCode {
        self.type_code
    }
}

/// Character codes, nationalized or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterDescriptor {
    type_code: TypeCode,
}

impl CharacterDescriptor {
    pub fn new(type_code: TypeCode) -> Self {
        Self { type_code }
    }
}

impl SqlTypeDescriptor for CharacterDescriptor {
    fn sql_type(&self) -> TypeCode {
        self.type_code
    }

    fn literal_formatter(&self, _value_type: ValueType) -> Box<dyn LiteralFormatter> {
        Box::new(CharacterLiteralFormatter::new(self.type_code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanDescriptor {
    type_code: TypeCode,
}

impl BooleanDescriptor {
    pub fn new(type_code: TypeCode) -> Self {
        Self { type_code }
    }
}

impl SqlTypeDescriptor for BooleanDescriptor {
    fn sql_type(&self) -> TypeCode {
        self.type_code
    }

    fn literal_formatter(&self, _value_type: ValueType) -> Box<dyn LiteralFormatter> {
        Box::new(BooleanLiteralFormatter::new(self.type_code))
    }
}

/// Date, time and timestamp codes. Never replaced by a dialect override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalDescriptor {
    type_code: TypeCode,
    precision: TemporalPrecision,
}

impl TemporalDescriptor {
    pub fn new(type_code: TypeCode, precision: TemporalPrecision) -> Self {
        Self {
            type_code,
            precision,
        }
    }

    pub fn precision(&self) -> TemporalPrecision {
        self.precision
    }
}

impl SqlTypeDescriptor for TemporalDescriptor {
    fn sql_type(&self) -> TypeCode {
        self.type_code
    }

    fn can_be_remapped(&self) -> bool {
        false
    }

    fn literal_formatter(&self, _value_type: ValueType) -> Box<dyn LiteralFormatter> {
        Box::new(TemporalLiteralFormatter::new(self.precision))
    }
}
