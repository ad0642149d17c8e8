pub mod flickr_client;
pub mod oauth;

pub use flickr_client::FlickrClient;
