//! Property checks across the public API, cross-checked against
//! `std::net` and `ipnetwork` on seeded random samples.

use anyhow::Result;
use netsome::converters::{ipv4, ipv6};
use netsome::error::{ErrorKind, NetError, PoolError};
use netsome::pool::{Ipv4Pool, RangePool, SharedPool, VlanPool};
use netsome::types::{
    IpAddress, Ipv4Address, Ipv4Interface, Ipv4Network, Ipv6Address, Ipv6Network, Vid,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing_subscriber::EnvFilter;

const SAMPLES: usize = 500;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x6e65_7473)
}

/// A random IPv4 network with host bits cleared.
fn random_v4_network(rng: &mut StdRng, min_prefix: u8) -> Ipv4Network {
    let prefix = rng.gen_range(min_prefix..=32);
    let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
    Ipv4Network::from_bits(u128::from(rng.gen::<u32>() & mask), prefix).unwrap()
}

#[test]
fn test_ipv4_text_round_trip() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let value: u32 = rng.gen();
        let text = ipv4::int_to_address(value);
        assert_eq!(text, Ipv4Addr::from(value).to_string());
        assert_eq!(ipv4::address_to_int(&text).unwrap(), value);

        let address: Ipv4Address = text.parse().unwrap();
        assert_eq!(address.to_string(), text);
        assert_eq!(Ipv4Addr::from(address), Ipv4Addr::from(value));
    }
}

#[test]
fn test_ipv6_canonical_matches_std() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        // zero out random groups so compression has runs to choose from
        let mut value: u128 = rng.gen();
        for group in 0..8 {
            if rng.gen_bool(0.5) {
                value &= !(0xffffu128 << (group * 16));
            }
        }
        // std renders these with an embedded dotted quad
        if value >> 32 == 0xffff || value >> 32 == 0 {
            continue;
        }

        let text = ipv6::int_to_address(value);
        assert_eq!(text, Ipv6Addr::from(value).to_string(), "{value:#x}");
        assert_eq!(ipv6::address_to_int(&text).unwrap(), value);

        let expanded = ipv6::int_to_expanded(value);
        assert_eq!(expanded.len(), 39);
        assert_eq!(ipv6::address_to_int(&expanded).unwrap(), value);
    }
}

#[test]
fn test_network_round_trip_and_ordering() {
    let mut rng = rng();
    let mut networks = Vec::new();
    for _ in 0..SAMPLES {
        let network = random_v4_network(&mut rng, 0);
        let reparsed: Ipv4Network = network.to_string().parse().unwrap();
        assert_eq!(reparsed, network);

        let reference: ipnetwork::Ipv4Network = network.to_string().parse().unwrap();
        assert_eq!(Ipv4Addr::from(network.netmask()), reference.mask());
        assert_eq!(Ipv4Addr::from(network.broadcast()), reference.broadcast());
        networks.push(network);
    }

    networks.sort();
    for pair in networks.windows(2) {
        let (a, b) = (pair[0].as_tuple(), pair[1].as_tuple());
        assert!(a <= b);
    }
}

#[test]
fn test_subnets_partition_parent() {
    let mut rng = rng();
    for _ in 0..50 {
        let parent = random_v4_network(&mut rng, 16);
        if parent.prefix_len() == 32 {
            continue;
        }
        let new_prefix = rng.gen_range(parent.prefix_len() + 1..=(parent.prefix_len() + 8).min(32));

        let children: Vec<_> = parent.subnets(Some(new_prefix)).unwrap().collect();
        assert_eq!(children.len(), 1 << (new_prefix - parent.prefix_len()));
        assert_eq!(
            children[0].network_address(),
            parent.network_address()
        );
        assert_eq!(
            children[children.len() - 1].last_address(),
            parent.last_address()
        );
        for pair in children.windows(2) {
            assert_eq!(
                pair[0].last_address().to_bits() + 1,
                pair[1].network_address().to_bits()
            );
        }

        let total: u128 = children.iter().map(|c| c.num_addresses().unwrap()).sum();
        assert_eq!(Some(total), parent.num_addresses());
        assert!(children.iter().all(|c| parent.contains_subnet(c)));
        assert!(children.iter().all(|c| c.supernet(Some(parent.prefix_len())).unwrap() == parent));
    }
}

#[test]
fn test_host_at_agrees_with_containment() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let network = random_v4_network(&mut rng, 8);
        let count = network.num_addresses().unwrap() as i128;
        let reference: ipnetwork::Ipv4Network = network.to_string().parse().unwrap();

        let index = rng.gen_range(0..count);
        let host = network.host_at(index).unwrap();
        assert!(network.contains_address(host));
        assert_eq!(Some(Ipv4Addr::from(host)), reference.nth(index as u32));
        assert_eq!(network.host_at(index - count).unwrap(), host);

        for bad in [count, -count - 1] {
            let err = network.host_at(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Index);
        }
    }
}

#[test]
fn test_sparse_indexing_large_blocks() {
    let network: Ipv4Network = "10.0.0.0/8".parse().unwrap();
    assert_eq!(network.host_at(0).unwrap().to_string(), "10.0.0.0");
    assert_eq!(network.host_at(1 << 16).unwrap().to_string(), "10.1.0.0");
    assert_eq!(network.host_at(-1).unwrap().to_string(), "10.255.255.255");
    assert_eq!(network.host_at(-(1 << 24)).unwrap().to_string(), "10.0.0.0");

    let network: Ipv6Network = "::/0".parse().unwrap();
    assert_eq!(network.num_addresses(), None);
    assert_eq!(
        network.host_at(-1).unwrap().to_string(),
        "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
    );
    assert_eq!(
        network.host_at(i128::MAX).unwrap().to_u128(),
        i128::MAX as u128
    );
    assert_eq!(
        network.host_at(i128::MIN).unwrap().to_u128(),
        u128::MAX - (i128::MIN.unsigned_abs() - 1)
    );

    let reference: ipnetwork::Ipv6Network = "2001:db8::/32".parse().unwrap();
    let network: Ipv6Network = "2001:db8::/32".parse().unwrap();
    assert_eq!(Some(reference.size()), network.num_addresses());
    assert_eq!(
        Ipv6Addr::from(network.host_at(-1).unwrap()),
        reference.broadcast()
    );
}

#[test]
fn test_hosts_match_reference() {
    for text in ["192.168.1.0/29", "10.0.0.0/30", "10.0.0.0/31", "10.0.0.7/32"] {
        let network: Ipv4Network = text.parse().unwrap();
        let ours: Vec<Ipv4Addr> = network.hosts().map(Ipv4Addr::from).collect();

        let reference: ipnetwork::Ipv4Network = text.parse().unwrap();
        let mut expected: Vec<Ipv4Addr> = reference.iter().collect();
        if network.prefix_len() <= 30 {
            expected.remove(0);
            expected.pop();
        }
        assert_eq!(ours, expected, "{text}");
    }
}

#[test]
fn test_interface_scenarios() {
    let iface: Ipv4Interface = "255.255.255.255/24".parse().unwrap();
    assert_eq!(iface.network().to_string(), "255.255.255.0/24");
    assert_eq!(iface.address().to_string(), "255.255.255.255");

    let err = "255.255.255.255/24".parse::<Ipv4Network>().unwrap_err();
    assert!(matches!(err, NetError::HostBitsSet(_)));

    let network: Ipv4Network = "1.1.1.0/24".parse().unwrap();
    let iface: Ipv4Interface = "1.1.1.1/24".parse().unwrap();
    assert_eq!(iface.network(), network);
    assert!(network.contains_address(iface.address()));
    assert_eq!(network.host_at(1).unwrap(), iface.address());
}

#[test]
fn test_mixed_parse_dispatch() {
    let host = Ipv6Network::parse("2001:db8::1").unwrap();
    assert_eq!(host.prefix_len(), 128);
    assert_eq!(host.network_address().cidr(), "2001:db8::1/128");

    let err = Ipv4Network::parse("not-an-address").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_pool_invariant_under_random_operations() -> Result<()> {
    init_tracing();
    let mut rng = rng();
    let mut pool = VlanPool::new(100, 200)?;
    let mut held: Vec<Vid> = Vec::new();

    for _ in 0..SAMPLES {
        if held.is_empty() || rng.gen_bool(0.6) {
            let lowest = pool.free().next();
            match pool.allocate(None) {
                Ok(vid) => {
                    assert_eq!(Some(vid), lowest);
                    assert!(held.iter().all(|h| *h != vid));
                    held.push(vid);
                }
                Err(PoolError::Exhausted) => assert_eq!(held.len(), 100),
                Err(e) => return Err(e.into()),
            }
        } else {
            let vid = held.swap_remove(rng.gen_range(0..held.len()));
            pool.release(vid)?;
        }

        let reserved: BTreeSet<Vid> = pool.reserved().collect();
        let free: BTreeSet<Vid> = pool.free().collect();
        assert!(reserved.is_disjoint(&free));
        assert_eq!(reserved.len() + free.len(), 100);
        assert_eq!(reserved, held.iter().copied().collect());
        assert_eq!(pool.first_free(), free.iter().next().copied());
    }
    Ok(())
}

#[test]
fn test_pool_release_then_allocate_specific() -> Result<()> {
    init_tracing();
    let network: Ipv4Network = "172.16.0.0/28".parse()?;
    let mut pool = Ipv4Pool::for_network(&network)?;
    let all: Vec<Ipv4Address> = std::iter::from_fn(|| pool.allocate(None).ok()).collect();
    assert_eq!(all, network.hosts().collect::<Vec<_>>());

    let victim = all[5];
    pool.release(victim)?;
    assert_eq!(pool.allocate(Some(victim))?, victim);
    assert!(pool.is_full());
    Ok(())
}

#[test]
fn test_shared_pool_across_threads() -> Result<()> {
    init_tracing();
    // four workers keep 133 items each and briefly hold one more
    let pool = SharedPool::new(RangePool::<u64>::new(1_000, 1_600)?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pool = pool.clone();
            std::thread::spawn(move || {
                let mut mine = Vec::new();
                for i in 0..200 {
                    let item = pool.allocate(None).unwrap();
                    if i % 3 == 0 {
                        pool.release(item).unwrap();
                    } else {
                        mine.push(item);
                    }
                }
                mine
            })
        })
        .collect();

    let mut seen = BTreeSet::new();
    for handle in handles {
        for item in handle.join().expect("worker panicked") {
            assert!(seen.insert(item));
        }
    }

    assert_eq!(seen.len(), 4 * 133);
    let snapshot = pool.snapshot();
    assert_eq!(snapshot.reserved.len(), seen.len());
    assert_eq!(snapshot.reserved, seen.into_iter().collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_ipv6_address_predicates_match_std() {
    let cases = ["::1", "::", "ff02::1", "fe80::1", "fd00::1", "2001:db8::1"];
    for text in cases {
        let ours: Ipv6Address = text.parse().unwrap();
        let std: Ipv6Addr = text.parse().unwrap();
        assert_eq!(ours.is_loopback(), std.is_loopback(), "{text}");
        assert_eq!(ours.is_unspecified(), std.is_unspecified(), "{text}");
        assert_eq!(ours.is_multicast(), std.is_multicast(), "{text}");
        assert_eq!(Ipv6Addr::from(ours), std);
    }
}
