pub trait Repository<T> {
    type Err: std::fmt::Display;
    fn get(&self, key: &str) -> Result<Option<T>, Self::Err>;
    fn revoke(&mut self, key: &str) -> Result<Option<T>, Self::Err>;
    fn put(&mut self, key: &str, data: &T) -> Result<(), Self::Err>;
}
