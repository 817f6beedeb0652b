use crate::{
    ChunkId, Collection, Config, EdgeLayout, GcError, Heap, ProgramState, Reachability, Region,
    Stack, SweepPolicy, Tracer,
};

fn unbounded() -> ProgramState {
    ProgramState::new(Config::unbounded())
}

#[test]
fn allocate_assigns_ids_in_order() {
    let mut heap = Heap::new(None);
    let a = heap.allocate("a".into(), EdgeLayout::Growable).unwrap();
    let b = heap.allocate("b".into(), EdgeLayout::Fixed(2)).unwrap();

    assert!(a < b);
    assert_eq!(heap.ids(), &[a, b]);
    assert!(heap.get(a).unwrap().references().is_empty());
    assert_eq!(heap.get(b).unwrap().references(), &[None, None]);
}

#[test]
fn heap_capacity_is_enforced() {
    let mut heap = Heap::new(Some(1));
    heap.allocate("first".into(), EdgeLayout::Growable).unwrap();

    let err = heap
        .allocate("second".into(), EdgeLayout::Growable)
        .unwrap_err();

    assert_eq!(
        err,
        GcError::AllocationExhausted {
            region: Region::Heap,
            name: "second".into(),
            capacity: 1,
        }
    );
    assert_eq!(heap.len(), 1);
}

#[test]
fn retain_compacts_and_never_reuses_ids() {
    let mut heap = Heap::new(Some(3));
    let a = heap.allocate("a".into(), EdgeLayout::Growable).unwrap();
    let b = heap.allocate("b".into(), EdgeLayout::Growable).unwrap();
    let c = heap.allocate("c".into(), EdgeLayout::Growable).unwrap();

    let freed = heap.retain(|chunk| chunk.label() != "b");

    assert_eq!(freed.len(), 1);
    assert_eq!(freed[0].id, b);
    assert_eq!(heap.ids(), &[a, c]);
    assert!(heap.get(b).is_none());
    assert!(heap.issued(b));

    // room was made, and the new chunk gets a fresh id
    let d = heap.allocate("d".into(), EdgeLayout::Growable).unwrap();
    assert!(d > c);
    assert_eq!(heap.ids(), &[a, c, d]);
}

#[test]
fn reset_marks_covers_survivors_of_retain() {
    let mut heap = Heap::new(None);
    let a = heap.allocate("a".into(), EdgeLayout::Growable).unwrap();
    let b = heap.allocate("b".into(), EdgeLayout::Growable).unwrap();
    let c = heap.allocate("c".into(), EdgeLayout::Growable).unwrap();

    for id in [a, b, c] {
        heap.get_mut(id).unwrap().set_marked(true);
    }
    heap.retain(|chunk| chunk.id() != b);
    heap.reset_marks();

    assert_eq!(heap.ids(), &[a, c]);
    assert!(heap.iter().all(|chunk| !chunk.is_marked()));
}

#[test]
fn unissued_targets_are_rejected() {
    let mut state = unbounded();
    let a = state.allocate("a").unwrap();
    let unissued = ChunkId(1);

    assert_eq!(
        state.mutate(|mu| mu.append_reference(a, unissued)),
        Err(GcError::ForeignHandle(unissued))
    );
    assert_eq!(
        state.set_var("x", Some(unissued)),
        Err(GcError::ForeignHandle(unissued))
    );
    assert!(state.stack().is_empty());

    // a self reference is always issued
    state.append_reference(a, a).unwrap();
    assert_eq!(state.chunk(a).unwrap().references(), &[Some(a)]);
}

#[test]
fn set_var_updates_in_place() {
    let mut stack = Stack::new(Some(2));
    stack.set_var("x", Some(ChunkId(0))).unwrap();
    stack.set_var("x", Some(ChunkId(1))).unwrap();

    assert_eq!(stack.len(), 1);
    assert_eq!(stack.get("x"), Some(Some(ChunkId(1))));
}

#[test]
fn set_var_is_case_sensitive() {
    let mut stack = Stack::new(None);
    stack.set_var("x", Some(ChunkId(0))).unwrap();
    stack.set_var("X", None).unwrap();

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.get("X"), Some(None));
    assert_eq!(stack.get("y"), None);
}

#[test]
fn stack_capacity_only_limits_new_names() {
    let mut stack = Stack::new(Some(1));
    stack.set_var("x", None).unwrap();

    assert!(matches!(
        stack.set_var("y", None),
        Err(GcError::AllocationExhausted {
            region: Region::Stack,
            ..
        })
    ));

    stack.set_var("x", Some(ChunkId(3))).unwrap();
    assert_eq!(stack.get("x"), Some(Some(ChunkId(3))));
}

#[test]
fn roots_skip_empty_vars_and_keep_duplicates() {
    let mut stack = Stack::new(None);
    stack.set_var("a", Some(ChunkId(4))).unwrap();
    stack.set_var("b", None).unwrap();
    stack.set_var("c", Some(ChunkId(4))).unwrap();

    let roots: Vec<ChunkId> = stack.roots().collect();
    assert_eq!(roots, vec![ChunkId(4), ChunkId(4)]);
}

#[test]
fn connect_out_of_bounds() {
    let mut state = unbounded();
    let a = state.allocate_with_capacity("a", 1).unwrap();

    let err = state.connect(a, 1, Some(a)).unwrap_err();

    assert_eq!(
        err,
        GcError::IndexOutOfBounds {
            label: "a".into(),
            index: 1,
            capacity: 1,
        }
    );
}

#[test]
fn append_to_fixed_chunk_fails() {
    let mut state = unbounded();
    let a = state.allocate_with_capacity("a", 2).unwrap();
    let b = state.allocate("b").unwrap();

    assert!(matches!(
        state.append_reference(a, b),
        Err(GcError::IndexOutOfBounds { index: 2, capacity: 2, .. })
    ));
}

#[test]
fn append_grows_by_one() {
    let mut state = unbounded();
    let a = state.allocate("a").unwrap();
    let b = state.allocate("b").unwrap();

    for expected in 1..=5 {
        state.append_reference(a, b).unwrap();
        assert_eq!(state.chunk(a).unwrap().references().len(), expected);
    }

    // an appended edge can be overwritten by slot afterwards
    state.connect(a, 4, None).unwrap();
    assert_eq!(state.chunk(a).unwrap().references()[4], None);
}

#[test]
fn tracer_visits_in_slot_order() {
    let mut state = unbounded();
    let (root, left, right, leaf) = state
        .mutate(|mu| {
            let root = mu.alloc("root")?;
            let left = mu.alloc("left")?;
            let right = mu.alloc("right")?;
            let leaf = mu.alloc("leaf")?;

            mu.append_reference(root, left)?;
            mu.append_reference(root, right)?;
            mu.append_reference(left, leaf)?;
            mu.set_var("r", Some(root))?;

            Ok::<_, GcError>((root, left, right, leaf))
        })
        .unwrap();

    let outcome = state.mark();

    assert_eq!(outcome.visit_order, vec![root, left, leaf, right]);
    assert_eq!(outcome.marked, 4);
}

#[test]
fn tracer_marks_self_loop_once() {
    let mut heap = Heap::new(None);
    let a = heap.allocate("a".into(), EdgeLayout::Growable).unwrap();
    heap.get_mut(a).unwrap().push_reference(a).unwrap();
    heap.get_mut(a).unwrap().push_reference(a).unwrap();

    let mut tracer = Tracer::new();
    tracer.trace(a);

    assert_eq!(tracer.trace_loop(&mut heap), 1);
    assert_eq!(tracer.visited(), &[a]);
}

#[test]
fn mark_resets_stale_marks() {
    let mut state = unbounded();
    let a = state.allocate("a").unwrap();
    state.set_var("a", Some(a)).unwrap();

    state.mark();
    assert!(state.chunk(a).unwrap().is_marked());

    state.set_var("a", None).unwrap();
    let outcome = state.mark();

    assert_eq!(outcome.marked, 0);
    assert!(!state.chunk(a).unwrap().is_marked());
}

#[test]
fn report_leaves_marks_and_heap_alone() {
    let mut state = unbounded();
    let a = state.allocate("a").unwrap();
    let b = state.allocate("b").unwrap();
    state.set_var("a", Some(a)).unwrap();

    let Collection::Report(report) = state.collect_with(SweepPolicy::Report) else {
        panic!("expected a report");
    };

    assert_eq!(report.status_of(a), Some(Reachability::Reachable));
    assert_eq!(report.status_of(b), Some(Reachability::Garbage));
    assert_eq!(state.heap().len(), 2);
    assert!(state.chunk(a).unwrap().is_marked());
    assert_eq!(state.report(), report);
}

#[test]
fn reclaim_clears_survivor_marks() {
    let mut state = unbounded();
    let a = state.allocate("a").unwrap();
    let b = state.allocate("b").unwrap();
    state.set_var("a", Some(a)).unwrap();

    let Collection::Reclaim(summary) = state.collect_with(SweepPolicy::Reclaim) else {
        panic!("expected a reclaim summary");
    };

    assert_eq!(summary.kept, 1);
    assert_eq!(summary.freed.len(), 1);
    assert_eq!(summary.freed[0].id, b);
    assert!(!state.chunk(a).unwrap().is_marked());
    assert!(state.chunk(b).is_none());
}

#[test]
fn dangling_edges_are_skipped_while_marking() {
    let mut state = unbounded();
    let a = state.allocate("a").unwrap();
    let b = state.allocate("b").unwrap();

    state.set_var("a", Some(a)).unwrap();
    state.collect_with(SweepPolicy::Reclaim);

    // a now points at the freed b
    state.append_reference(a, b).unwrap();
    let outcome = state.mark();

    assert_eq!(outcome.marked, 1);
    assert_eq!(outcome.dangling, 1);
}

#[test]
fn configured_policy_is_used() {
    let mut state = ProgramState::new(Config::unbounded().with_policy(SweepPolicy::Reclaim));
    state.allocate("garbage").unwrap();

    assert!(matches!(state.collect(), Collection::Reclaim(_)));
    assert!(state.heap().is_empty());
}

#[test]
fn display_formats() {
    let mut state = unbounded();
    let a = state.allocate_with_capacity("alpha", 2).unwrap();
    let b = state.allocate("beta").unwrap();

    state.connect(a, 0, Some(b)).unwrap();
    state.set_var("root", Some(a)).unwrap();
    state.set_var("gone", None).unwrap();
    state.mark();

    let expected = "\
Stack:
  root -> alpha
  gone -> NULL

Heap:
  alpha (marked=1) refs: beta NULL
  beta (marked=1) refs:
";

    assert_eq!(state.to_string(), expected);

    let report = state.report();
    assert_eq!(
        report.entries[1].to_string(),
        "HeapChunk[1] @ 0x0001 (beta) is reachable."
    );
}
