pub struct FileSystem;
