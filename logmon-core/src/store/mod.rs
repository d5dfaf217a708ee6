mod window;


pub use window::RecordStore;
