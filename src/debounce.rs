//! Retardo cancelable para recalcular la vista mientras el usuario escribe.
//!
//! Cada `schedule` cancela la tarea pendiente anterior, así que de una ráfaga
//! de cambios sólo corre la última.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pendiente: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, pendiente: Mutex::new(None) }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Programa `tarea` tras el retardo y cancela la anterior si no corrió.
    /// Debe llamarse dentro de un runtime de tokio.
    pub fn schedule<F>(&self, tarea: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tarea();
        });
        let mut guard = self.pendiente.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(anterior) = guard.replace(handle) {
            anterior.abort();
        }
    }

    /// Cancela la tarea pendiente, si hay. Devuelve si había una sin terminar.
    pub fn cancel(&self) -> bool {
        let mut guard = self.pendiente.lock().unwrap_or_else(|e| e.into_inner());
        match guard.take() {
            Some(h) => {
                let activa = !h.is_finished();
                h.abort();
                activa
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        let guard = self.pendiente.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.pendiente.lock() {
            if let Some(h) = guard.take() {
                h.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn solo_corre_la_ultima() {
        let d = Debouncer::new(Duration::from_millis(30));
        let contador = Arc::new(AtomicUsize::new(0));
        let ultimo = Arc::new(AtomicUsize::new(0));

        for i in 1..=5 {
            let c = Arc::clone(&contador);
            let u = Arc::clone(&ultimo);
            d.schedule(move || {
                c.fetch_add(1, Ordering::SeqCst);
                u.store(i, Ordering::SeqCst);
            });
        }
        assert!(d.is_pending());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(contador.load(Ordering::SeqCst), 1);
        assert_eq!(ultimo.load(Ordering::SeqCst), 5);
        assert!(!d.is_pending());
    }

    #[tokio::test]
    async fn cancelar_evita_la_ejecucion() {
        let d = Debouncer::new(Duration::from_millis(30));
        let contador = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&contador);
        d.schedule(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert!(d.cancel());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(contador.load(Ordering::SeqCst), 0);
        assert!(!d.cancel());
    }
}
