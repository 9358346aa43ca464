mod iteration;
mod setops;
mod traits;
