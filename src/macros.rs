//! Macros for wiring identifier traits onto plain structs.

/// Implements [`Entity`](crate::dto::Entity) or [`Dto`](crate::dto::Dto)
/// for structs whose key lives in an `id` field.
///
/// # Usage
///
/// ```ignore
/// use bizsvc::identified;
///
/// identified!(entity Contact: u64);
/// identified!(dto ContactDto: u64, ContactEdit: u64);
/// ```
#[macro_export]
macro_rules! identified {
    (entity $($ty:ty : $key:ty),+ $(,)?) => {
        $(
            impl $crate::dto::Entity<$key> for $ty {
                fn id(&self) -> &$key {
                    &self.id
                }

                fn set_id(&mut self, id: $key) {
                    self.id = id;
                }
            }
        )+
    };
    (dto $($ty:ty : $key:ty),+ $(,)?) => {
        $(
            impl $crate::dto::Dto<$key> for $ty {
                fn id(&self) -> &$key {
                    &self.id
                }
            }
        )+
    };
}
