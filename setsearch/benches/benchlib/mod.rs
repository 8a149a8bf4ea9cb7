use rand::{distributions::Uniform, prelude::Distribution, thread_rng};

/// `len` uniform values in `0..=max_value`, unsorted and possibly repeated.
pub fn uniform_values(max_value: u32, len: usize) -> Vec<u32> {
    let rng = &mut thread_rng();
    let dist = Uniform::from(0..=max_value);
    dist.sample_iter(rng).take(len).collect()
}
