use std::collections::BTreeMap;

use crate::interface_adapter::port::{ConsoleDevice, ConsoleRegistry};
use crate::shared::error::ConsoleError;

/// In-memory console registry keyed by device name.
#[derive(Default)]
pub struct ConsoleTable {
    consoles: BTreeMap<String, Box<dyn ConsoleDevice>>,
}

impl ConsoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.consoles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consoles.is_empty()
    }

    pub fn suspend_all(&mut self) {
        self.consoles.values_mut().for_each(|c| c.suspend());
    }

    pub fn resume_all(&mut self) {
        self.consoles.values_mut().for_each(|c| c.resume());
    }
}

impl ConsoleRegistry for ConsoleTable {
    fn register(&mut self, console: Box<dyn ConsoleDevice>) -> Result<(), ConsoleError> {
        let name = console.name().to_string();
        if self.consoles.contains_key(&name) {
            return Err(ConsoleError::DuplicateConsole(name));
        }
        self.consoles.insert(name, console);
        Ok(())
    }

    fn unregister(&mut self, name: &str) -> Result<Box<dyn ConsoleDevice>, ConsoleError> {
        self.consoles
            .remove(name)
            .ok_or_else(|| ConsoleError::ConsoleNotFound(name.to_string()))
    }

    fn search(&mut self, name: &str) -> Option<&mut dyn ConsoleDevice> {
        self.consoles.get_mut(name).map(|c| c.as_mut() as &mut dyn ConsoleDevice)
    }

    fn names(&self) -> Vec<String> {
        self.consoles.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Device that logs what happens to it into a shared journal.
    struct JournalDevice {
        name: String,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl JournalDevice {
        fn boxed(name: &str, journal: &Arc<Mutex<Vec<String>>>) -> Box<dyn ConsoleDevice> {
            Box::new(Self {
                name: name.to_string(),
                journal: Arc::clone(journal),
            })
        }

        fn log(&self, event: &str) {
            self.journal.lock().unwrap().push(format!("{}:{event}", self.name));
        }
    }

    impl ConsoleDevice for JournalDevice {
        fn name(&self) -> &str {
            &self.name
        }

        fn read(&mut self, _buf: &mut [u8]) -> usize {
            0
        }

        fn write(&mut self, buf: &[u8]) -> usize {
            self.log(&String::from_utf8_lossy(buf));
            buf.len()
        }

        fn suspend(&mut self) {
            self.log("suspend");
        }

        fn resume(&mut self) {
            self.log("resume");
        }
    }

    fn journal() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[test]
    fn register_and_search_by_name() {
        let j = journal();
        let mut table = ConsoleTable::new();
        table.register(JournalDevice::boxed("fb0", &j)).unwrap();
        table.register(JournalDevice::boxed("fb1", &j)).unwrap();

        assert_eq!(table.search("fb1").unwrap().write(b"hi"), 2);
        assert!(table.search("fb2").is_none());
        assert_eq!(*j.lock().unwrap(), vec!["fb1:hi".to_string()]);
        assert_eq!(table.names(), vec!["fb0".to_string(), "fb1".to_string()]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let j = journal();
        let mut table = ConsoleTable::new();
        table.register(JournalDevice::boxed("fb0", &j)).unwrap();
        let err = table.register(JournalDevice::boxed("fb0", &j)).unwrap_err();
        assert!(matches!(err, ConsoleError::DuplicateConsole(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unregister_returns_the_device() {
        let j = journal();
        let mut table = ConsoleTable::new();
        table.register(JournalDevice::boxed("fb0", &j)).unwrap();
        let device = table.unregister("fb0").unwrap();
        assert_eq!(device.name(), "fb0");
        assert!(table.is_empty());
        assert!(matches!(
            table.unregister("fb0"),
            Err(ConsoleError::ConsoleNotFound(_))
        ));
    }

    #[test]
    fn suspend_and_resume_reach_every_device() {
        let j = journal();
        let mut table = ConsoleTable::new();
        table.register(JournalDevice::boxed("a", &j)).unwrap();
        table.register(JournalDevice::boxed("b", &j)).unwrap();
        table.suspend_all();
        table.resume_all();
        assert_eq!(
            *j.lock().unwrap(),
            vec!["a:suspend", "b:suspend", "a:resume", "b:resume"]
        );
    }
}
