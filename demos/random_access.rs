use std::net::Ipv4Addr;

use prefix_treap::*;

use ipnet::{IpNet, Ipv4Net};
use rand::prelude::*;

fn main() {
    let mut table = PrefixTable::<IpNet, u32>::new();
    let mut snapshots = Vec::new();

    let mut rng = thread_rng();

    for i in 0..1_000_000 {
        let prefix = Ipv4Net::new(Ipv4Addr::new(rng.gen(), rng.gen(), 0, 0), rng.gen_range(1..=16))
            .unwrap()
            .trunc();
        let prefix = IpNet::V4(prefix);

        if rng.gen_bool(0.7) {
            let value: u32 = rng.gen::<u8>() as u32;
            table.insert(prefix, value);
        } else if rng.gen_bool(0.1) {
            // copy-on-write path, even though no other version holds the nodes
            table = table.delete_immutable(&prefix).0;
        } else {
            table.delete(&prefix);
        }

        if i % 100_000 == 0 {
            snapshots.push(table.clone());
        }
    }

    let addr = Ipv4Addr::new(rng.gen(), rng.gen(), rng.gen(), rng.gen()).into();
    for (i, snapshot) in snapshots.iter().enumerate() {
        println!(
            "version {i}: {} prefixes, lookup({addr}) = {:?}",
            snapshot.len(),
            snapshot.lookup(addr)
        );
    }
    println!("final: {} prefixes", table.len());
}
