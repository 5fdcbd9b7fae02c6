//! Vec wrapper that tells subscribers about every mutation, synchronously and in order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Replaced { len: usize },
    Added { index: usize },
}

type Listener = Box<dyn FnMut(ListChange)>;

pub struct ObservableList<T> {
    items: Vec<T>,
    listeners: Vec<Listener>,
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

impl<T> ObservableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ListChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.items = items.into_iter().collect();
        self.notify(ListChange::Replaced {
            len: self.items.len(),
        });
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.notify(ListChange::Added {
            index: self.items.len() - 1,
        });
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn notify(&mut self, change: ListChange) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}
