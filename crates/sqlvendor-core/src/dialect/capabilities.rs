//! Declarative capability flags

use serde::{Deserialize, Serialize};

/// Facts the query engine consults when choosing what SQL to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub supports_limit: bool,
    pub supports_limit_offset: bool,
    /// Limit and offset can be bound as parameters
    pub supports_variable_limit: bool,
    /// The limit is a maximum row number rather than a row count
    pub use_max_for_limit: bool,
    pub case_insensitive_string_comparisons: bool,
    pub read_committed_blocks_writers: bool,
    pub repeatable_read_blocks_writers: bool,
    pub supports_circular_cascade_delete: bool,
    pub supports_lob_value_change_propagation: bool,
    pub supports_forward_only_cursor_positioning: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            supports_limit: false,
            supports_limit_offset: false,
            supports_variable_limit: false,
            use_max_for_limit: false,
            case_insensitive_string_comparisons: false,
            read_committed_blocks_writers: false,
            repeatable_read_blocks_writers: false,
            supports_circular_cascade_delete: true,
            supports_lob_value_change_propagation: true,
            supports_forward_only_cursor_positioning: true,
        }
    }
}

impl Capabilities {
    /// Flag name and value pairs, for display
    pub fn entries(&self) -> [(&'static str, bool); 10] {
        [
            ("supports_limit", self.supports_limit),
            ("supports_limit_offset", self.supports_limit_offset),
            ("supports_variable_limit", self.supports_variable_limit),
            ("use_max_for_limit", self.use_max_for_limit),
            (
                "case_insensitive_string_comparisons",
                self.case_insensitive_string_comparisons,
            ),
            (
                "read_committed_blocks_writers",
                self.read_committed_blocks_writers,
            ),
            (
                "repeatable_read_blocks_writers",
                self.repeatable_read_blocks_writers,
            ),
            (
                "supports_circular_cascade_delete",
                self.supports_circular_cascade_delete,
            ),
            (
                "supports_lob_value_change_propagation",
                self.supports_lob_value_change_propagation,
            ),
            (
                "supports_forward_only_cursor_positioning",
                self.supports_forward_only_cursor_positioning,
            ),
        ]
    }
}

/// Partial capability set; only the flags that are present are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapabilityOverrides {
    pub supports_limit: Option<bool>,
    pub supports_limit_offset: Option<bool>,
    pub supports_variable_limit: Option<bool>,
    pub use_max_for_limit: Option<bool>,
    pub case_insensitive_string_comparisons: Option<bool>,
    pub read_committed_blocks_writers: Option<bool>,
    pub repeatable_read_blocks_writers: Option<bool>,
    pub supports_circular_cascade_delete: Option<bool>,
    pub supports_lob_value_change_propagation: Option<bool>,
    pub supports_forward_only_cursor_positioning: Option<bool>,
}

impl CapabilityOverrides {
    pub fn apply_to(&self, capabilities: &mut Capabilities) {
        let pairs = [
            (self.supports_limit, &mut capabilities.supports_limit),
            (
                self.supports_limit_offset,
                &mut capabilities.supports_limit_offset,
            ),
            (
                self.supports_variable_limit,
                &mut capabilities.supports_variable_limit,
            ),
            (self.use_max_for_limit, &mut capabilities.use_max_for_limit),
            (
                self.case_insensitive_string_comparisons,
                &mut capabilities.case_insensitive_string_comparisons,
            ),
            (
                self.read_committed_blocks_writers,
                &mut capabilities.read_committed_blocks_writers,
            ),
            (
                self.repeatable_read_blocks_writers,
                &mut capabilities.repeatable_read_blocks_writers,
            ),
            (
                self.supports_circular_cascade_delete,
                &mut capabilities.supports_circular_cascade_delete,
            ),
            (
                self.supports_lob_value_change_propagation,
                &mut capabilities.supports_lob_value_change_propagation,
            ),
            (
                self.supports_forward_only_cursor_positioning,
                &mut capabilities.supports_forward_only_cursor_positioning,
            ),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_only_present_flags() {
        let mut caps = Capabilities::default();
        let overrides = CapabilityOverrides {
            supports_limit: Some(true),
            supports_circular_cascade_delete: Some(false),
            ..Default::default()
        };
        overrides.apply_to(&mut caps);
        assert!(caps.supports_limit);
        assert!(!caps.supports_circular_cascade_delete);
        assert!(caps.supports_lob_value_change_propagation);
        assert!(!caps.supports_limit_offset);
    }

    #[test]
    fn test_empty_overrides() {
        assert!(CapabilityOverrides::default().is_empty());
        let mut caps = Capabilities::default();
        CapabilityOverrides::default().apply_to(&mut caps);
        assert_eq!(caps, Capabilities::default());
    }
}
