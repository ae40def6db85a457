use anyhow::Result;
use log::info;

use method_resolution_core::{CallFlags, Foundation, Mode, MethodFlags, MethodImplementor, StatusCode, InvocationArgs};

struct Greeter(String);

impl MethodImplementor for Greeter {
    fn call(&self, args: &InvocationArgs<'_>) -> StatusCode {
        info!("{} (args: {:?})", self.0, args.real_args());
        StatusCode::Ok
    }
}

/// Minimal smoke demo: build a two-level hierarchy, resolve `greet`, and
/// drive the resulting chain to completion.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Building a small class hierarchy");
    let mut foundation = Foundation::builder().build();

    let base = foundation.new_class();
    let derived = foundation.new_class();
    foundation.add_superclass(derived, base)?;

    let greet = foundation.intern("greet");
    let base_greet = foundation.new_method(greet, MethodFlags::PUBLIC, Some(base));
    foundation.method_mut(base_greet).implementor = Some(std::rc::Rc::new(Greeter("hello from base".into())));
    foundation.set_class_method(base, greet, base_greet);

    let derived_greet = foundation.new_method(greet, MethodFlags::PUBLIC, Some(derived));
    foundation.method_mut(derived_greet).implementor =
        Some(std::rc::Rc::new(Greeter("hello from derived".into())));
    foundation.set_class_method(derived, greet, derived_greet);

    let object = foundation.new_object(derived);
    let mut context = method_resolution_core::resolve(&mut foundation, object, Some(greet), CallFlags::new(Mode::Public))
        .expect("greet resolves");

    while !context.is_done() {
        method_resolution_core::invoke_step(&mut foundation, &mut context, &[]);
    }

    info!("Done");
    Ok(())
}
