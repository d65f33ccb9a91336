/// Invoke a macro once per tuple arity, from the full list of type names down to a single name.
#[doc(hidden)]
#[macro_export]
macro_rules! for_each_arity {
    ($m:ident; $head:ident) => {
        $m!($head);
    };
    ($m:ident; $head:ident, $($tail:ident),+) => {
        $m!($head, $($tail),+);
        $crate::for_each_arity!($m; $($tail),+);
    };
}

/// Implement a macro for every tuple of 1 to 16 elements.
///
/// Sixteen covers any realistic query; the default world only has 32 component slots.
#[doc(hidden)]
#[macro_export]
macro_rules! all_tuples {
    ($m:ident) => {
        $crate::for_each_arity!(
            $m; T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15, T16
        );
    };
}

#[cfg(test)]
mod tests {
    trait Arity {
        const ARITY: usize;
    }

    macro_rules! count_arity {
        ($($name:ident),*) => {
            impl<$($name),*> Arity for ($($name,)*) {
                const ARITY: usize = [$(stringify!($name)),*].len();
            }
        };
    }

    all_tuples!(count_arity);

    #[test]
    fn covers_every_arity() {
        assert_eq!(<(u8,)>::ARITY, 1);
        assert_eq!(<(u8, u16, u32)>::ARITY, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8)>::ARITY,
            16
        );
    }
}
