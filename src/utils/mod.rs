pub mod hash;
pub mod html;
pub mod mail;
pub mod session;
pub mod token;
pub mod upload;
pub mod youtube;
