use super::*;

qc!(lookup_addr, _lookup_addr);
fn _lookup_addr((treap, addrs): (PrefixTreap<TestPrefix, i32>, Vec<u32>)) -> bool {
    // also probe the boundaries of every stored prefix
    let bounds = treap.keys().flat_map(|p| {
        [p.first(), p.last()]
            .into_iter()
            .chain(p.first().checked_sub(1))
            .chain(p.last().checked_add(1))
    });
    let probes = addrs.into_iter().chain(bounds).collect::<Vec<_>>();
    probes.into_iter().all(|addr| {
        treap.lookup(addr) == brute_force_lpm(&treap, |p| p.first() <= addr && addr <= p.last())
    })
}

qc!(lookup_prefix, _lookup_prefix);
fn _lookup_prefix((treap, prefixes): (PrefixTreap<TestPrefix, i32>, Vec<TestPrefix>)) -> bool {
    let probes = prefixes.into_iter().chain(treap.keys().copied()).collect::<Vec<_>>();
    probes.into_iter().all(|q| {
        treap.lookup_prefix(&q)
            == brute_force_lpm(&treap, |p| p.first() <= q.first() && q.last() <= p.last())
    })
}

qc!(lookup_after_mods, _lookup_after_mods);
fn _lookup_after_mods((mut ops, addrs): (Vec<Operation<TestPrefix, i32>>, Vec<u32>)) -> bool {
    let later = ops.split_off(ops.len() / 2);
    let mut treap = PrefixTreap::new();
    let mut model = HashMap::new();
    apply(ops, &mut treap, &mut model);
    let snapshot = treap.clone();
    let want = addrs
        .iter()
        .map(|addr| brute_force_lpm(&snapshot, |p| p.contains_addr(*addr)).map(|(p, t)| (*p, *t)))
        .collect::<Vec<_>>();
    apply(later, &mut treap, &mut model);
    snapshot.check_invariants().is_ok()
        && addrs.iter().zip(want).all(|(addr, want)| {
            snapshot.lookup(*addr).map(|(p, t)| (*p, *t)) == want
                && treap.lookup(*addr) == brute_force_lpm(&treap, |p| p.contains_addr(*addr))
        })
}
