#[macro_export]
macro_rules! scalar_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Bool,
                Bool,
                wire = Bool,
                label = "bool",
                is_identifier = false,
                supports_ordering = false
            ),
            (
                Date,
                Temporal,
                wire = String,
                label = "date",
                is_identifier = false,
                supports_ordering = true
            ),
            (
                Float,
                Numeric,
                wire = Number,
                label = "float",
                is_identifier = false,
                supports_ordering = true
            ),
            (
                Int,
                Numeric,
                wire = Integer,
                label = "int",
                is_identifier = false,
                supports_ordering = true
            ),
            (
                Json,
                Opaque,
                wire = Any,
                label = "json",
                is_identifier = false,
                supports_ordering = false
            ),
            (
                Text,
                Textual,
                wire = String,
                label = "text",
                is_identifier = false,
                supports_ordering = true
            ),
            (
                Timestamp,
                Temporal,
                wire = String,
                label = "timestamp",
                is_identifier = false,
                supports_ordering = true
            ),
            (
                Uint,
                Numeric,
                wire = Integer,
                label = "uint",
                is_identifier = false,
                supports_ordering = true
            ),
            (
                Uuid,
                Identifier,
                wire = String,
                label = "uuid",
                is_identifier = true,
                supports_ordering = true
            ),
        }
    };
}

#[macro_export]
macro_rules! scalar_kind_registry {
    ($macro:ident) => {
        $crate::scalar_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::scalar_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($scalar:ident, $family:ident, wire = $wire:ident, label = $label:expr, is_identifier = $is_identifier:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ScalarKind::$scalar => $crate::ScalarMetadata {
                    family: $crate::ScalarFamily::$family,
                    wire: $crate::WireShape::$wire,
                    label: $label,
                    is_identifier: $is_identifier,
                    supports_ordering: $supports_ordering,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($scalar:ident, $family:ident, wire = $wire:ident, label = $label:expr, is_identifier = $is_identifier:expr, supports_ordering = $supports_ordering:expr) ),* $(,)? ) => {
        [ $( $crate::ScalarKind::$scalar ),* ]
    };
}
