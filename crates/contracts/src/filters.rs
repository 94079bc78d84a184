//! Abstract filter descriptors sent to the dynamic remitos query.

use serde::{Deserialize, Serialize};

use crate::table_config::{FIRMADO_NO, FIRMADO_SI, SIGNED_COLUMN};

/// Operator of a single filter descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Like,
    GreaterThan,
    LessThan,
    In,
}

/// One abstract filter over a single column.
///
/// `field` must match `^[A-Za-z0-9_]+$`; the query builder rejects anything
/// else before SQL construction (the sole injection defense).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterDescriptor {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Tri-state signed filter kept by the table controller.
///
/// The wire form is the canonical option value; anything unrecognized means
/// "all" and adds no descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirmadoFilter {
    #[default]
    NoFirmados,
    SiFirmados,
    Todos,
}

impl FirmadoFilter {
    pub fn from_value(value: &str) -> Self {
        match value {
            FIRMADO_NO => FirmadoFilter::NoFirmados,
            FIRMADO_SI => FirmadoFilter::SiFirmados,
            _ => FirmadoFilter::Todos,
        }
    }

    pub fn as_value(&self) -> &'static str {
        match self {
            FirmadoFilter::NoFirmados => FIRMADO_NO,
            FirmadoFilter::SiFirmados => FIRMADO_SI,
            FirmadoFilter::Todos => "",
        }
    }

    /// The descriptor this tri-state contributes, if any. The signed flag is
    /// stored as `'2'` once a remito carries a signature.
    pub fn to_descriptor(&self) -> Option<FilterDescriptor> {
        match self {
            FirmadoFilter::NoFirmados => Some(FilterDescriptor::new(
                SIGNED_COLUMN,
                FilterOperator::NotEquals,
                SIGNED_VALUE,
            )),
            FirmadoFilter::SiFirmados => Some(FilterDescriptor::new(
                SIGNED_COLUMN,
                FilterOperator::Equals,
                SIGNED_VALUE,
            )),
            FirmadoFilter::Todos => None,
        }
    }
}

/// Stored value of the signed flag once a remito has been signed.
pub const SIGNED_VALUE: &str = "2";
