//! Geo module - country outlines for the choropleth

mod world;

pub use world::{CountryShape, GeoError, Ring, WorldMap};
