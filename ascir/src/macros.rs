/// Start a registration for operator type `$name`, stamped with the
/// current source file and line.
///
/// ```ignore
/// reg_asc_ir!(Abs)
///     .input("x", "T")
///     .output("y", "T")
///     .data_type("T", TypeConstraint::set([DataType::Float, DataType::Float16]))
///     .register()?;
/// ```
#[macro_export]
macro_rules! reg_asc_ir {
    ($name:ident) => {
        $crate::registry::OpDefBuilder::new(stringify!($name), file!(), line!())
    };
}

/// Register every builder expression into `$registry`, stopping at the first error.
#[macro_export]
macro_rules! try_register_all {
    ($registry:expr, [ $($builder:expr),* $(,)? ]) => {{
        $( $builder.register_into($registry)?; )*
        Ok(())
    }};
}
