//! Integration flows across hp-01..hp-04.

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod persistence;
#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
