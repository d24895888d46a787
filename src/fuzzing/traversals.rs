use super::*;

qc!(walk_is_iter, _walk_is_iter);
fn _walk_is_iter(treap: PrefixTreap<TestPrefix, i32>) -> bool {
    let mut walked = Vec::new();
    let completed = treap.walk(|p, t| {
        walked.push((*p, *t));
        true
    });
    completed && treap.iter().map(|(p, t)| (*p, *t)).eq(walked)
}

qc!(walk_stops, _walk_stops);
fn _walk_stops((treap, stop): (PrefixTreap<TestPrefix, i32>, usize)) -> bool {
    let mut calls = 0;
    let completed = treap.walk(|_, _| {
        calls += 1;
        calls <= stop
    });
    if stop < treap.len() {
        !completed && calls == stop + 1
    } else {
        completed && calls == treap.len()
    }
}

qc!(iter_sorted, _iter_sorted);
fn _iter_sorted(treap: PrefixTreap<TestPrefix, i32>) -> bool {
    treap
        .keys()
        .tuple_windows()
        .all(|(a, b)| a.cmp_key(b) == std::cmp::Ordering::Less)
        && treap.keys().count() == treap.len()
}

qc!(keys_values, _keys_values);
fn _keys_values(treap: PrefixTreap<TestPrefix, i32>) -> bool {
    treap.keys().eq(treap.iter().map(|(p, _)| p))
        && treap.values().eq(treap.iter().map(|(_, t)| t))
}
