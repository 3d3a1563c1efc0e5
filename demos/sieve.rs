use block_bitset::BitSet;

fn sieve(limit: usize) -> BitSet {
    let mut composite = BitSet::with_capacity(limit);
    composite.insert_range(..2.min(limit)).unwrap();
    let mut candidate = 2;
    while candidate * candidate < limit {
        if !composite.contains(candidate) {
            for multiple in (candidate * candidate..limit).step_by(candidate) {
                composite.insert(multiple).unwrap();
            }
        }
        candidate += 1;
    }
    composite
}

fn main() {
    const LIMIT: usize = 100;
    let composite = sieve(LIMIT);
    let primes: Vec<usize> = composite.zeroes().collect();
    println!("{} primes below {LIMIT}: {primes:?}", primes.len());

    let largest: Vec<usize> = composite.zeroes().rev().take(3).collect();
    println!("largest three: {largest:?}");

    let odd = BitSet::from_iter((1..LIMIT).step_by(2));
    let primes = composite.bit_not();
    println!("odd non-primes: {}", odd.difference(&primes).count());
    println!("{composite:b}");
}
