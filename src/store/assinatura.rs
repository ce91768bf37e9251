// src/store/assinatura.rs

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::store::Documento;

/// Consulta ordenada com entrega ao vivo: carrega o snapshot inicial e o
/// receptor dos snapshots emitidos depois de cada gravação na coleção.
pub struct ConsultaAoVivo {
    snapshot: Vec<Documento>,
    rx: broadcast::Receiver<Vec<Documento>>,
}

impl ConsultaAoVivo {
    pub fn new(snapshot: Vec<Documento>, rx: broadcast::Receiver<Vec<Documento>>) -> Self {
        Self { snapshot, rx }
    }

    /// O conjunto de resultados no momento da abertura da consulta.
    pub fn snapshot(&self) -> &[Documento] {
        &self.snapshot
    }

    /// Entrega o snapshot inicial e depois cada snapshot emitido, na ordem de
    /// emissão. Cada entrega carrega o conjunto de resultados completo.
    pub fn assinar<F>(self, mut tratador: F) -> Assinatura
    where
        F: FnMut(Vec<Documento>) + Send + 'static,
    {
        let ConsultaAoVivo { snapshot, mut rx } = self;
        let tarefa = tokio::spawn(async move {
            tratador(snapshot);
            loop {
                match rx.recv().await {
                    Ok(docs) => tratador(docs),
                    // Emissões perdidas não importam: a próxima carrega o
                    // conjunto completo.
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Assinatura {
            tarefa,
            cancelada: AtomicBool::new(false),
        }
    }
}

/// Assinatura de uma consulta ao vivo. `cancelar` é idempotente e o drop
/// cancela, garantindo que uma view desmontada não receba mais snapshots.
pub struct Assinatura {
    tarefa: JoinHandle<()>,
    cancelada: AtomicBool,
}

impl Assinatura {
    pub fn cancelar(&self) {
        if !self.cancelada.swap(true, Ordering::SeqCst) {
            self.tarefa.abort();
        }
    }

    pub fn cancelada(&self) -> bool {
        self.cancelada.load(Ordering::SeqCst)
    }
}

impl Drop for Assinatura {
    fn drop(&mut self) {
        self.cancelar();
    }
}
