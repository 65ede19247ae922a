pub mod grain_grid;
