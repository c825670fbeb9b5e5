//! Scalar override: the highest-precedence layer that sets a field wins

use super::OriginTracked;
use crate::layer::{ConfigLayer, OrderedLayers};

/// Walk layers in precedence order and return the first value the accessor finds.
///
/// Falls back to `default` with origin `"default"` when no layer sets the field.
pub fn override_first_wins<T, F>(
    layers: &OrderedLayers<'_>,
    default: T,
    accessor: F,
) -> OriginTracked<T>
where
    F: Fn(&ConfigLayer) -> Option<T>,
{
    layers
        .iter()
        .find_map(|layer| accessor(layer).map(|value| OriginTracked::new(value, layer.origin())))
        .unwrap_or_else(|| OriginTracked::default_value(default))
}
