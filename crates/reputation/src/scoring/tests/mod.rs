mod badges;
mod common;
mod titles;
