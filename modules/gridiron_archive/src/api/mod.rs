//! API layers over the domain service

pub mod rest;
