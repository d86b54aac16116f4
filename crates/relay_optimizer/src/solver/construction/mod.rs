pub mod greedy;
pub mod random_permutation;
