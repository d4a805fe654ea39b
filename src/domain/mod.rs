// Domain layer: bundle identities, install results and the ports the setup task depends on.

pub mod model;
pub mod ports;
