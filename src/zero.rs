//! Zero-value initializers of resolved types.

use crate::mapping::zero_literal;
use crate::types::ResolvedType;

impl ResolvedType {
    /// Go expression initializing a value of this type.
    ///
    /// Returns an empty string when no sensible zero exists; the caller must
    /// then supply its own default.
    pub fn zero(&self) -> String {
        if self.is_aliased {
            if let Some(zero) = zero_literal(&self.aliased_type) {
                return format!("{}({})", self.go_type, zero);
            }
        }
        // native types and strfmt formats
        if let Some(zero) = zero_literal(&self.go_type) {
            return zero.to_string();
        }
        // free-form values are flagged as maps too
        if self.is_interface {
            return "nil".to_string();
        }
        if self.is_map {
            return format!("make({}, 50)", self.go_type);
        }
        if self.is_array {
            return format!("make({}, 0, 50)", self.go_type);
        }
        if self.is_tuple || self.is_complex_object {
            if self.is_nullable {
                return format!("new({})", self.go_type);
            }
            return format!("{}{{}}", self.go_type);
        }

        String::new()
    }
}
