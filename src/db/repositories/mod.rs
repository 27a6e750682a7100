mod inspections;
mod photos;
mod properties;
