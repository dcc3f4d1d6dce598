// src/lib.rs

//! movie-rating library
//!
//! Resolves release folder names such as
//! `Daddys.Home.2.2017.1080p.WEB-DL.DD5.1.H264-FGT` to an IMDb identity and
//! rating, optionally cross-checked against TMDB.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
