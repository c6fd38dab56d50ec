//! Sets of components added to an entity at once.

use super::{Component, ComponentBox};

/// Collection of components which can be attached to an entity at once.
///
/// Implemented for tuples of up to 8 components and for lists
/// of [`ComponentBox`]es built at runtime.
///
pub trait Bundle {
    /// Erases types of the components, keeping their order.
    fn into_components(self) -> Vec<ComponentBox>;
}

impl Bundle for Vec<ComponentBox> {
    fn into_components(self) -> Vec<ComponentBox> {
        self
    }
}

impl Bundle for () {
    fn into_components(self) -> Vec<ComponentBox> {
        Vec::new()
    }
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name),+> Bundle for ($($name,)+)
        where
            $($name: Component,)+
        {
            #[allow(non_snake_case)]
            fn into_components(self) -> Vec<ComponentBox> {
                let ($($name,)+) = self;
                vec![$(ComponentBox::new($name)),+]
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
