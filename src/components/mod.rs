pub mod ripple_map;
