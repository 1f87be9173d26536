//! Per-type enable flags for scans

use super::value::ValueType;

/// Selects which numeric widths a scan considers. All four are enabled by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFilter {
    pub i32_enabled: bool,
    pub i64_enabled: bool,
    pub f32_enabled: bool,
    pub f64_enabled: bool,
}

impl Default for TypeFilter {
    fn default() -> Self {
        TypeFilter {
            i32_enabled: true,
            i64_enabled: true,
            f32_enabled: true,
            f64_enabled: true,
        }
    }
}

impl TypeFilter {
    /// A filter with every type disabled
    pub fn none() -> Self {
        TypeFilter {
            i32_enabled: false,
            i64_enabled: false,
            f32_enabled: false,
            f64_enabled: false,
        }
    }

    /// A filter enabling exactly one type
    pub fn only(ty: ValueType) -> Self {
        let mut filter = Self::none();
        filter.set(ty, true);
        filter
    }

    pub fn is_enabled(&self, ty: ValueType) -> bool {
        match ty {
            ValueType::I32 => self.i32_enabled,
            ValueType::I64 => self.i64_enabled,
            ValueType::F32 => self.f32_enabled,
            ValueType::F64 => self.f64_enabled,
        }
    }

    pub fn set(&mut self, ty: ValueType, enabled: bool) {
        match ty {
            ValueType::I32 => self.i32_enabled = enabled,
            ValueType::I64 => self.i64_enabled = enabled,
            ValueType::F32 => self.f32_enabled = enabled,
            ValueType::F64 => self.f64_enabled = enabled,
        }
    }

    pub fn enable_all(&mut self) {
        *self = TypeFilter::default();
    }

    /// The enabled tags in flat-index order
    pub fn enabled(&self) -> impl Iterator<Item = ValueType> + '_ {
        ValueType::ALL.into_iter().filter(|ty| self.is_enabled(*ty))
    }
}
