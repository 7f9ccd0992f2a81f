//! Value descriptors: how values of one type code are bound, extracted and
//! written as literals

mod standard;

pub use standard::{
    BasicDescriptor, BooleanDescriptor, CharacterDescriptor, TemporalDescriptor,
};

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{DialectError, Result};
use crate::literal::{BasicLiteralFormatter, LiteralFormatter};
use crate::types::{TypeCode, TypeConfiguration, ValueType};
use crate::value::{Binder, Extractor};

/// Behavior attached to one type code
pub trait SqlTypeDescriptor: std::fmt::Debug + Send + Sync {
    fn sql_type(&self) -> TypeCode;

    /// Whether a dialect may replace this descriptor with one of its own
    fn can_be_remapped(&self) -> bool {
        true
    }

    fn recommended_value_type(&self, config: &TypeConfiguration) -> Result<ValueType> {
        config.recommended_value_type(self.sql_type())
    }

    fn binder(&self, value_type: ValueType) -> Result<Binder> {
        Binder::new(self.sql_type(), value_type)
    }

    fn extractor(&self, value_type: ValueType) -> Result<Extractor> {
        Extractor::new(self.sql_type(), value_type)
    }

    fn literal_formatter(&self, _value_type: ValueType) -> Box<dyn LiteralFormatter> {
        Box::new(BasicLiteralFormatter::new(self.sql_type()))
    }
}

/// Descriptors keyed by type code
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: IndexMap<TypeCode, Arc<dyn SqlTypeDescriptor>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One descriptor for every type code except [`TypeCode::Other`]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for code in TypeCode::ALL {
            if code == TypeCode::Other {
                continue;
            }
            let descriptor: Arc<dyn SqlTypeDescriptor> = if let Some(precision) =
                code.temporal_precision()
            {
                Arc::new(TemporalDescriptor::new(code, precision))
            } else if code.is_character() {
                Arc::new(CharacterDescriptor::new(code))
            } else if matches!(code, TypeCode::Bit | TypeCode::Boolean) {
                Arc::new(BooleanDescriptor::new(code))
            } else {
                Arc::new(BasicDescriptor::new(code))
            };
            registry.register(descriptor);
        }
        registry
    }

    pub fn register(&mut self, descriptor: Arc<dyn SqlTypeDescriptor>) {
        self.descriptors.insert(descriptor.sql_type(), descriptor);
    }

    pub fn contains(&self, type_code: TypeCode) -> bool {
        self.descriptors.contains_key(&type_code)
    }

    pub fn get(&self, type_code: TypeCode) -> Result<Arc<dyn SqlTypeDescriptor>> {
        self.descriptors
            .get(&type_code)
            .cloned()
            .ok_or(DialectError::DescriptorNotRegistered { type_code })
    }

    pub fn type_codes(&self) -> impl Iterator<Item = TypeCode> + '_ {
        self.descriptors.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = DescriptorRegistry::standard();
        assert!(registry.contains(TypeCode::TinyInt));
        assert!(!registry.contains(TypeCode::Other));
        assert_eq!(
            registry.get(TypeCode::NVarchar).unwrap().sql_type(),
            TypeCode::NVarchar
        );
        assert_eq!(
            registry.get(TypeCode::Other).unwrap_err().kind(),
            "descriptor-not-registered"
        );
    }

    #[test]
    fn test_recommended_value_type() {
        let registry = DescriptorRegistry::standard();
        let descriptor = registry.get(TypeCode::SmallInt).unwrap();
        assert_eq!(
            descriptor.recommended_value_type(&TypeConfiguration::default()),
            Ok(ValueType::Short)
        );
        assert!(descriptor
            .recommended_value_type(&TypeConfiguration::empty())
            .is_err());
    }

    #[test]
    fn test_binder_through_descriptor() {
        let registry = DescriptorRegistry::standard();
        let descriptor = registry.get(TypeCode::Date).unwrap();
        assert!(descriptor.binder(ValueType::Date).is_ok());
        assert!(descriptor.binder(ValueType::String).is_err());
    }
}
