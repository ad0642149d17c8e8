pub mod album;
pub mod flickr;
pub mod loaders;

pub use album::{Album, Batch, UploadOutcome, UploadPlan};
pub use flickr::{Photo, Photoset, FlickrUser};
pub use loaders::{load_credentials, FlickrCredentials, OAuthToken};
