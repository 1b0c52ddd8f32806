extern crate compare;
extern crate serde;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate serde_test;

pub mod arena;
pub mod rbtree;
