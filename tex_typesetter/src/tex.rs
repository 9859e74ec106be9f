/*! Core data structures, such as [`CategoryCode`](catcodes::CategoryCode)s, [`Token`](tokens::Token)s,
[`Glue`](numerics::glue::Glue) and [`Node`](nodes::Node)s.*/
pub mod catcodes;
pub mod characters;
pub mod nodes;
pub mod numerics;
pub mod tokens;
