use super::*;

qc!(new, _new);
fn _new(list: Vec<(TestPrefix, i32)>) -> bool {
    let mut treap = PrefixTreap::new();
    let mut hmap = HashMap::new();

    for (p, t) in list {
        treap.insert(p, t);
        hmap.insert(p, t);
    }

    // assert that the iterator of both is the same
    treap.len() == hmap.len() && treap.into_iter().eq(hmap.into_iter().sorted())
}

qc!(new_mods, _new_mods);
fn _new_mods(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut treap = PrefixTreap::new();
    let mut hmap = HashMap::new();
    apply(list, &mut treap, &mut hmap);
    treap.len() == hmap.len() && treap.into_iter().eq(sorted(&hmap))
}

qc!(invariants, _invariants);
fn _invariants(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut treap = PrefixTreap::new();
    for op in list {
        match op {
            Operation::Add(p, t) => {
                treap.insert(p, t);
            }
            Operation::Remove(p) => {
                treap.remove(&p);
            }
        }
        if let Err(e) = treap.check_invariants() {
            eprintln!("{e}");
            return false;
        }
    }
    true
}

qc!(insert_returns_old, _insert_returns_old);
fn _insert_returns_old(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut treap = PrefixTreap::new();
    let mut hmap = HashMap::new();
    list.into_iter().all(|op| match op {
        Operation::Add(p, t) => treap.insert(p, t) == hmap.insert(p, t),
        Operation::Remove(p) => treap.remove(&p) == hmap.remove(&p),
    })
}

qc!(versions, _versions);
fn _versions(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut treap = PrefixTreap::new();
    let mut hmap = HashMap::new();
    let mut history = vec![(treap.clone(), hmap.clone())];

    for op in list {
        match op {
            Operation::Add(p, t) => {
                treap = treap.insert_immutable(p, t);
                hmap.insert(p, t);
            }
            Operation::Remove(p) => {
                let (new, found) = treap.delete_immutable(&p);
                if found != hmap.remove(&p).is_some() {
                    return false;
                }
                treap = new;
            }
        }
        history.push((treap.clone(), hmap.clone()));
    }

    // every old version must still hold exactly what it held when it was created
    history
        .into_iter()
        .all(|(t, h)| t.check_invariants().is_ok() && t.into_iter().eq(sorted(&h)))
}

qc!(versions_mut, _versions_mut);
fn _versions_mut(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut treap = PrefixTreap::new();
    let mut hmap = HashMap::new();
    let mut history = Vec::new();

    for op in list {
        history.push((treap.clone(), hmap.clone()));
        apply(vec![op], &mut treap, &mut hmap);
    }
    history.push((treap, hmap));

    history
        .into_iter()
        .all(|(t, h)| t.check_invariants().is_ok() && t.into_iter().eq(sorted(&h)))
}

qc!(idempotence, _idempotence);
fn _idempotence((treap, p, t): (PrefixTreap<TestPrefix, i32>, TestPrefix, i32)) -> bool {
    let once = treap.insert_immutable(p, t);
    let twice = once.insert_immutable(p, t);
    once == twice && format!("{once:?}") == format!("{twice:?}")
}

qc!(delete_insert_inverse, _delete_insert_inverse);
fn _delete_insert_inverse(treap: PrefixTreap<TestPrefix, i32>) -> bool {
    treap.iter().all(|(p, t)| {
        let (mut new, found) = treap.delete_immutable(p);
        new.insert(*p, *t);
        found && new == treap && new.check_invariants().is_ok()
    })
}

qc!(shape_independent_of_order, _shape_independent_of_order);
fn _shape_independent_of_order(list: Vec<(TestPrefix, i32)>) -> bool {
    // keep the first value of each prefix, such that the order only affects the shape
    let mut hmap = HashMap::new();
    for (p, t) in list {
        hmap.entry(p).or_insert(t);
    }
    let forward: PrefixTreap<_, _> = hmap.clone().into_iter().sorted().collect();
    let backward: PrefixTreap<_, _> = hmap.into_iter().sorted().rev().collect();
    format!("{forward:?}") == format!("{backward:?}")
}

qc!(equality, _equality);
fn _equality(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut treap = PrefixTreap::default();
    apply(list, &mut treap, &mut HashMap::new());

    let clone = treap.clone().into_iter().collect::<PrefixTreap<_, _>>();
    let deep = treap.deep_clone();

    // assert that the iterator of both is the same
    treap == clone
        && treap == deep
        && treap.len() == clone.len()
        && treap.is_empty() == clone.is_empty()
}

qc!(clear, _clear);
fn _clear(mut treap: PrefixTreap<TestPrefix, i32>) -> bool {
    let snapshot = treap.clone();
    let len = snapshot.len();
    treap.clear();
    treap.is_empty() && treap.len() == 0 && snapshot.len() == len && snapshot.iter().count() == len
}

qc!(get, _get);
fn _get((treap, p): (PrefixTreap<TestPrefix, i32>, TestPrefix)) -> bool {
    let want = treap.iter().find(|(q, _)| **q == p);
    treap.get_key_value(&p) == want
        && treap.get(&p) == want.map(|(_, t)| t)
        && treap.contains_key(&p) == want.is_some()
}
