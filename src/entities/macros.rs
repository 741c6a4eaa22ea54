//! Macros for reducing boilerplate when defining entities
//!
//! One invocation per table replaces a hand-written service class: the
//! macro emits the record struct, its `Entity` and `Data` impls, the
//! static field registry and the field accessor.

/// Complete macro to create a Data entity with automatic trait implementations
///
/// Every entity gets an `id: Uuid` field in front of the declared ones.
/// The id defaults to nil when absent from a JSON body, which lets the
/// service assign a fresh one on create.
///
/// # Example
///
/// ```rust,ignore
/// use registrar::prelude::*;
///
/// impl_data_entity!(
///     Student,
///     "student",
///     "students",
///     ["first_name", "last_name", "email"],
///     {
///         first_name: String,
///         last_name: String,
///         email: String,
///         grade_level: i32,
///         guardian_id: Option<Uuid>,
///     }
/// );
///
/// let student = Student::new(
///     "Ada".to_string(),
///     "Lovelace".to_string(),
///     "ada@school.test".to_string(),
///     10,
///     None,
/// );
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        [ $( $searchable:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            #[serde(default)]
            pub id: ::uuid::Uuid,
            $( $(#[$field_meta])* pub $field : $field_type ),*
        }

        // Implement Entity trait
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn set_id(&mut self, id: ::uuid::Uuid) {
                self.id = id;
            }
        }

        // Implement Data trait
        impl $crate::core::entity::Data for $type {
            fn fields() -> &'static [$crate::core::field::FieldDef] {
                const FIELDS: &[$crate::core::field::FieldDef] = &[
                    $crate::core::field::FieldDef::new(
                        "id",
                        $crate::core::field::FieldKind::Uuid,
                        false,
                    ),
                    $(
                        $crate::core::field::FieldDef::new(
                            stringify!($field),
                            <$field_type as $crate::core::field::FieldType>::KIND,
                            <$field_type as $crate::core::field::FieldType>::NULLABLE,
                        ),
                    )*
                ];
                FIELDS
            }

            fn searchable_fields() -> &'static [&'static str] {
                &[ $( $searchable ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::Uuid(self.id)),
                    $(
                        stringify!($field) => Some(
                            $crate::core::field::FieldType::to_field_value(&self.$field)
                        ),
                    )*
                    _ => None,
                }
            }
        }

        // Utility methods
        impl $type {
            /// Create a new instance with a fresh id
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_type ),*) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    $( $field ),*
                }
            }
        }
    };
}
