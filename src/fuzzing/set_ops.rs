use super::*;

/// The union of both maps as a sorted list, taking the value of `b` on duplicates if `overwrite`
/// is set, and the one of `a` otherwise.
fn want_union(
    a: &PrefixTreap<TestPrefix, i32>,
    b: &PrefixTreap<TestPrefix, i32>,
    overwrite: bool,
) -> Vec<(TestPrefix, i32)> {
    let (first, second) = if overwrite { (a, b) } else { (b, a) };
    let mut union_set: HashMap<TestPrefix, i32> = HashMap::new();
    union_set.extend(first.iter().map(|(p, t)| (*p, *t)));
    union_set.extend(second.iter().map(|(p, t)| (*p, *t)));
    union_set.into_iter().sorted().collect()
}

qc!(union, _union);
fn _union(
    (a, b, overwrite): (
        PrefixTreap<TestPrefix, i32>,
        PrefixTreap<TestPrefix, i32>,
        bool,
    ),
) -> bool {
    let want = want_union(&a, &b, overwrite);
    let a_before = a.iter().map(|(p, t)| (*p, *t)).collect::<Vec<_>>();
    let b_before = b.iter().map(|(p, t)| (*p, *t)).collect::<Vec<_>>();

    let got = a.union_immutable(&b, overwrite);

    got.check_invariants().is_ok()
        && got.len() == want.len()
        && got.into_iter().eq(want)
        && a.into_iter().eq(a_before)
        && b.into_iter().eq(b_before)
}

qc!(union_mut, _union_mut);
fn _union_mut(
    (mut a, b, overwrite): (
        PrefixTreap<TestPrefix, i32>,
        PrefixTreap<TestPrefix, i32>,
        bool,
    ),
) -> bool {
    let want = want_union(&a, &b, overwrite);
    let b_before = b.iter().map(|(p, t)| (*p, *t)).collect::<Vec<_>>();
    a.union(&b, overwrite);
    a.check_invariants().is_ok()
        && a.len() == want.len()
        && a.into_iter().eq(want)
        && b.into_iter().eq(b_before)
}

qc!(union_shared, _union_shared);
fn _union_shared((a, ops): (PrefixTreap<TestPrefix, i32>, Vec<Operation<TestPrefix, i32>>)) -> bool {
    // `b` shares most of its nodes with `a`
    let mut b = a.clone();
    apply(ops, &mut b, &mut HashMap::new());
    let want = want_union(&a, &b, false);
    let got = a.union_immutable(&b, false);
    got.check_invariants().is_ok() && got.into_iter().eq(want)
}

qc!(union_self, _union_self);
fn _union_self((a, overwrite): (PrefixTreap<TestPrefix, i32>, bool)) -> bool {
    let got = a.union_immutable(&a, overwrite);
    got.check_invariants().is_ok() && got == a
}

qc!(union_shape, _union_shape);
fn _union_shape((a, b): (PrefixTreap<TestPrefix, i32>, PrefixTreap<TestPrefix, i32>)) -> bool {
    // the result has the same shape as inserting all elements one by one
    let got = a.union_immutable(&b, true);
    let mut want = a.clone();
    want.extend(b.iter().map(|(p, t)| (*p, *t)));
    format!("{got:?}") == format!("{want:?}")
}
