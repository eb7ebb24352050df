// src/web/aviso.rs
//! Avisos de uma só leitura: uma ação grava-os num cookie assinado e a
//! próxima página renderizada mostra-os e apaga-os.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies, Key};

const AVISO_COOKIE: &str = "aviso";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoAviso {
    Erro,
    Sucesso,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aviso {
    pub tipo: TipoAviso,
    pub mensagem: String,
}

impl Aviso {
    pub fn erro(mensagem: impl Into<String>) -> Self {
        Self { tipo: TipoAviso::Erro, mensagem: mensagem.into() }
    }

    pub fn sucesso(mensagem: impl Into<String>) -> Self {
        Self { tipo: TipoAviso::Sucesso, mensagem: mensagem.into() }
    }

    pub fn titulo(&self) -> &'static str {
        match self.tipo {
            TipoAviso::Erro => "Erro",
            TipoAviso::Sucesso => "Sucesso",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.tipo {
            TipoAviso::Erro => "aviso-erro",
            TipoAviso::Sucesso => "aviso-sucesso",
        }
    }
}

pub fn exibir_erro(cookies: &Cookies, key: &Key, mensagem: impl Into<String>) {
    guardar(cookies, key, Aviso::erro(mensagem));
}

pub fn exibir_sucesso(cookies: &Cookies, key: &Key, mensagem: impl Into<String>) {
    guardar(cookies, key, Aviso::sucesso(mensagem));
}

fn guardar(cookies: &Cookies, key: &Key, aviso: Aviso) {
    match serde_json::to_vec(&aviso) {
        Ok(json) => {
            // Base64 sem padding: nada de aspas, vírgulas nem '%', que o
            // CookieManager descodificaria na leitura e quebraria a assinatura
            let mut cookie = Cookie::new(AVISO_COOKIE, URL_SAFE_NO_PAD.encode(json));
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookies.signed(key).add(cookie);
        }
        Err(e) => tracing::error!("Falha ao serializar aviso: {:?}", e),
    }
}

/// Lê e consome o aviso pendente, se houver. Um cookie adulterado ou
/// ilegível é apagado na mesma, para não ficar preso no navegador.
pub fn tomar(cookies: &Cookies, key: &Key) -> Option<Aviso> {
    // Sem cookie nenhum, não há nada a apagar
    cookies.get(AVISO_COOKIE)?;

    let assinado = cookies.signed(key).get(AVISO_COOKIE);

    let mut remocao = Cookie::from(AVISO_COOKIE);
    remocao.set_path("/");
    cookies.remove(remocao);

    let Some(cookie) = assinado else {
        tracing::warn!("Cookie de aviso com assinatura inválida descartado.");
        return None;
    };

    let lido = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice::<Aviso>(&bytes).map_err(|e| e.to_string()));
    match lido {
        Ok(aviso) => Some(aviso),
        Err(e) => {
            tracing::warn!("Cookie de aviso ilegível: {}", e);
            None
        }
    }
}
