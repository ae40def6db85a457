//! Property tests over randomly generated class graphs.

use std::collections::HashSet;
use std::rc::Rc;

use method_resolution_core::{
    resolve, CallFlags, ClassId, Foundation, InvocationArgs, MethodFlags, MethodImplementor, Mode,
    StatusCode,
};
use proptest::prelude::*;

const CLASS_COUNT: usize = 5;

struct NoOp;
impl MethodImplementor for NoOp {
    fn call(&self, _args: &InvocationArgs<'_>) -> StatusCode {
        StatusCode::Ok
    }
}

/// A bounded random class graph over a fixed `CLASS_COUNT` classes:
/// `supers[i]` lists indices `< i` that class `i` extends (acyclic by
/// construction), `methods[i]` says whether class `i` defines each of
/// a 3-name method pool, and if so whether it's public.
#[derive(Debug, Clone)]
struct Graph {
    supers: Vec<Vec<usize>>,
    methods: Vec<[Option<bool>; 3]>,
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    let parent_picks = proptest::collection::vec((any::<u8>(), any::<u8>(), any::<bool>()), CLASS_COUNT);
    let method_picks = proptest::collection::vec(
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
        ),
        CLASS_COUNT,
    );

    (parent_picks, method_picks).prop_map(|(parents_raw, methods_raw)| {
        let mut supers = vec![Vec::new(); CLASS_COUNT];
        for i in 1..CLASS_COUNT {
            let (p1, p2, use_two) = parents_raw[i];
            let a = (p1 as usize) % i;
            supers[i].push(a);
            if use_two && i > 1 {
                let b = (p2 as usize) % i;
                if b != a {
                    supers[i].push(b);
                }
            }
        }
        let methods = methods_raw
            .into_iter()
            .map(|(a, b, c)| [a, b, c])
            .collect();
        Graph { supers, methods }
    })
}

fn build(foundation: &mut Foundation, graph: &Graph) -> Vec<ClassId> {
    let classes: Vec<ClassId> = (0..graph.supers.len()).map(|_| foundation.new_class()).collect();
    for (i, supers) in graph.supers.iter().enumerate() {
        for &s in supers {
            // Construction is acyclic by index order already; any
            // rejection here would indicate a bug in the generator, not
            // a case worth exercising.
            foundation.add_superclass(classes[i], classes[s]).unwrap();
        }
    }
    let names: Vec<_> = (0..3).map(|n| foundation.intern(&format!("m{n}"))).collect();
    for (i, defs) in graph.methods.iter().enumerate() {
        for (n, def) in defs.iter().enumerate() {
            if let Some(public) = def {
                let flags = if *public { MethodFlags::PUBLIC } else { MethodFlags::empty() };
                let mid = foundation.new_method(names[n], flags, Some(classes[i]));
                foundation.method_mut(mid).implementor = Some(Rc::new(NoOp));
                foundation.set_class_method(classes[i], names[n], mid);
            }
        }
    }
    classes
}

proptest! {
    #[test]
    fn chains_have_no_duplicate_non_filter_entries_and_filters_precede(graph in graph_strategy()) {
        let mut foundation = Foundation::new("unknown");
        let classes = build(&mut foundation, &graph);
        let leaf = *classes.last().unwrap();
        let object = foundation.new_object(leaf);

        for n in 0..3 {
            let name = foundation.intern(&format!("m{n}"));
            if let Some(context) = resolve(&mut foundation, object, Some(name), CallFlags::new(Mode::Public)) {
                let filter_length = context.filter_length();
                prop_assert!(context.chain[..filter_length].iter().all(|e| e.is_filter));
                prop_assert!(context.chain[filter_length..].iter().all(|e| !e.is_filter));

                let mut seen = HashSet::new();
                for entry in context.chain[filter_length..].iter() {
                    prop_assert!(seen.insert(entry.method), "duplicate non-filter entry");
                }
            }
        }
    }

    #[test]
    fn resolution_after_new_class_reflects_the_bumped_epoch(graph in graph_strategy()) {
        let mut foundation = Foundation::new("unknown");
        let classes = build(&mut foundation, &graph);
        let leaf = *classes.last().unwrap();
        let object = foundation.new_object(leaf);
        let name = foundation.intern("m0");

        if let Some(first) = resolve(&mut foundation, object, Some(name), CallFlags::new(Mode::Public)) {
            let extra = foundation.new_class();
            foundation.add_object_mixin(object, extra);

            if let Some(second) = resolve(&mut foundation, object, Some(name), CallFlags::new(Mode::Public)) {
                if first.global_epoch.is_some() {
                    prop_assert_eq!(second.global_epoch, Some(foundation.global_epoch()));
                }
                prop_assert!(second.local_epoch >= first.local_epoch);
            }
        }
    }
}
