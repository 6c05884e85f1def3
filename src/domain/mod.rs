// Domain layer: the wire records and the port the comparison service implements.

pub mod model;
pub mod ports;
