// src/controle/sistema.rs
use crate::{
    controle::acoes::{FalhaLogin, FalhaPainel},
    error::AppResult,
    models::{
        evento::{Evento, LinhaPainel, StatusEvento},
        usuario::{Organizador, Usuario},
    },
    services::repositorio::{ConsultaEventos, ConsultaUsuarios, ContagemInscricoes},
};
use chrono::{Local, NaiveDateTime};

/// Deixa só os dígitos 0-9 (tira pontos, traços, espaços, ...).
pub fn normalizar_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Hora local usada para calcular o estado dos eventos.
pub fn agora() -> NaiveDateTime {
    Local::now().naive_local()
}

/// O que o painel mostra: o nome do organizador e uma linha por evento.
#[derive(Debug, Clone)]
pub struct Painel {
    pub nome_organizador: String,
    pub linhas: Vec<LinhaPainel>,
}

/// Fluxo principal: login, escolha do painel e dados do painel do organizador.
pub struct ControladorSistema<'a, R> {
    repo: &'a R,
}

impl<'a, R> ControladorSistema<'a, R>
where
    R: ConsultaUsuarios + ConsultaEventos + ContagemInscricoes,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Resolve o CPF digitado no ecrã de login.
    ///
    /// O erro externo é falha da base de dados; o interno é uma tentativa
    /// recusada, que vira um aviso para o utilizador.
    pub async fn processar_login(&self, cpf_input: &str) -> AppResult<Result<Organizador, FalhaLogin>> {
        if cpf_input.trim().is_empty() {
            tracing::warn!("Login sem CPF.");
            return Ok(Err(FalhaLogin::CpfVazio));
        }

        let cpf = normalizar_cpf(cpf_input);
        tracing::info!("Tentativa de login para CPF: {}", cpf);

        let resultado = match self.repo.get(&cpf).await? {
            None => Err(FalhaLogin::CpfNaoEncontrado),
            Some(Usuario::Organizador(organizador)) => Ok(organizador),
            Some(Usuario::Atleta(_)) => Err(FalhaLogin::PainelAtletaNaoImplementado),
            Some(Usuario::Desconhecido { tipo, .. }) => {
                tracing::warn!("CPF {} tem tipo desconhecido '{}'.", cpf, tipo);
                Err(FalhaLogin::TipoDesconhecido)
            }
        };

        match &resultado {
            Ok(organizador) => tracing::info!("✅ Organizador '{}' autenticado.", organizador.cpf),
            Err(falha) => tracing::warn!("Login recusado para {}: {}", cpf, falha),
        }
        Ok(resultado)
    }

    /// Volta a ler o organizador guardado na sessão. `None` se já não for organizador.
    pub async fn carregar_organizador(&self, cpf: &str) -> AppResult<Option<Organizador>> {
        match self.repo.get(cpf).await? {
            Some(Usuario::Organizador(organizador)) => Ok(Some(organizador)),
            _ => Ok(None),
        }
    }

    pub async fn abrir_painel(&self, organizador: &Organizador, agora: NaiveDateTime) -> AppResult<Painel> {
        let eventos = self.repo.get_all_by_organizador(&organizador.cpf).await?;
        let linhas = self.preparar_linhas_painel(&eventos, agora).await?;
        Ok(Painel {
            nome_organizador: organizador.nome.clone(),
            linhas,
        })
    }

    /// Uma linha por evento, pela mesma ordem. O estado é sempre recalculado com `agora`.
    pub async fn preparar_linhas_painel(
        &self,
        eventos: &[Evento],
        agora: NaiveDateTime,
    ) -> AppResult<Vec<LinhaPainel>> {
        let mut linhas = Vec::with_capacity(eventos.len());
        for evento in eventos {
            let inscritos = self.repo.count_by_evento(evento.id).await?;
            linhas.push(LinhaPainel {
                evento_id: evento.id,
                nome: evento.nome.clone(),
                data: evento.data.clone(),
                inscritos,
                status: StatusEvento::calcular(&evento.data, agora),
            });
        }
        Ok(linhas)
    }

    /// Resolve a linha selecionada para a gestão de kits.
    ///
    /// A seleção é o id do evento e é procurada numa lista acabada de ler,
    /// nunca numa lista de uma renderização anterior.
    pub async fn selecionar_evento_para_kits(
        &self,
        organizador: &Organizador,
        selecao: Option<&str>,
    ) -> AppResult<Result<Evento, FalhaPainel>> {
        let Some(evento_id) = selecao.and_then(|s| s.trim().parse::<i64>().ok()) else {
            return Ok(Err(FalhaPainel::NenhumEventoSelecionado));
        };

        let eventos = self.repo.get_all_by_organizador(&organizador.cpf).await?;
        match eventos.into_iter().find(|e| e.id == evento_id) {
            Some(evento) => Ok(Ok(evento)),
            None => {
                tracing::warn!(
                    "Evento {} selecionado por {} não existe (ou não é dele).",
                    evento_id,
                    organizador.cpf
                );
                Ok(Err(FalhaPainel::EventoNaoEncontrado))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usuario::Atleta;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    /// Repositório em memória que regista as chamadas recebidas.
    #[derive(Default)]
    struct RepoFalso {
        usuarios: HashMap<String, Usuario>,
        eventos: Mutex<Vec<Evento>>,
        contagens: HashMap<i64, i64>,
        buscas_usuario: Mutex<Vec<String>>,
        consultas_eventos: AtomicUsize,
    }

    impl RepoFalso {
        fn com_usuario(mut self, usuario: Usuario) -> Self {
            self.usuarios.insert(usuario.cpf().to_string(), usuario);
            self
        }

        fn com_evento(self, id: i64, dono: &str, nome: &str, data: &str, inscritos: i64) -> Self {
            let mut repo = self;
            repo.eventos.get_mut().expect("lock").push(Evento {
                id,
                organizador_cpf: dono.into(),
                nome: nome.into(),
                data: data.into(),
                local: String::new(),
            });
            repo.contagens.insert(id, inscritos);
            repo
        }

        fn buscas(&self) -> Vec<String> {
            self.buscas_usuario.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl ConsultaUsuarios for RepoFalso {
        async fn get(&self, cpf: &str) -> AppResult<Option<Usuario>> {
            self.buscas_usuario.lock().expect("lock").push(cpf.to_string());
            Ok(self.usuarios.get(cpf).cloned())
        }
    }

    #[async_trait]
    impl ConsultaEventos for RepoFalso {
        async fn get_all_by_organizador(&self, organizador_cpf: &str) -> AppResult<Vec<Evento>> {
            self.consultas_eventos.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .eventos
                .lock()
                .expect("lock")
                .iter()
                .filter(|e| e.organizador_cpf == organizador_cpf)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl ContagemInscricoes for RepoFalso {
        async fn count_by_evento(&self, evento_id: i64) -> AppResult<i64> {
            Ok(self.contagens.get(&evento_id).copied().unwrap_or(0))
        }
    }

    fn olga() -> Organizador {
        Organizador {
            cpf: "12345678900".into(),
            nome: "Olga Organizadora".into(),
            email: "olga@example.com".into(),
            telefone: None,
        }
    }

    fn caio() -> Usuario {
        Usuario::Atleta(Atleta {
            cpf: "98765432100".into(),
            nome: "Caio".into(),
            email: String::new(),
            data_nascimento: None,
        })
    }

    fn meio_dia(ano: i32, mes: u32, dia: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(ano, mes, dia)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("data")
    }

    #[test]
    fn normalizes_to_digits_only() {
        assert_eq!(normalizar_cpf("123.456-789"), "123456789");
        assert_eq!(normalizar_cpf(" 123 456 789/00 "), "12345678900");
        assert_eq!(normalizar_cpf("abc"), "");
        // Dígitos não-ASCII não contam
        assert_eq!(normalizar_cpf("١٢٣4"), "4");
    }

    #[tokio::test]
    async fn lookup_uses_normalized_cpf() {
        let repo = RepoFalso::default().com_usuario(Usuario::Organizador(olga()));
        let controlador = ControladorSistema::new(&repo);

        let resultado = controlador.processar_login("123.456.789-00").await.expect("db");
        assert_eq!(resultado, Ok(olga()));
        assert_eq!(repo.buscas(), vec!["12345678900"]);
    }

    #[tokio::test]
    async fn blank_input_never_reaches_lookup() {
        let repo = RepoFalso::default().com_usuario(Usuario::Organizador(olga()));
        let controlador = ControladorSistema::new(&repo);

        for entrada in ["", "   ", "\t\n"] {
            let resultado = controlador.processar_login(entrada).await.expect("db");
            assert_eq!(resultado, Err(FalhaLogin::CpfVazio));
        }
        assert!(repo.buscas().is_empty());
        assert_eq!(FalhaLogin::CpfVazio.to_string(), "Por favor, insira um CPF.");
    }

    #[tokio::test]
    async fn unknown_cpf_is_not_found() {
        let repo = RepoFalso::default();
        let controlador = ControladorSistema::new(&repo);
        let resultado = controlador.processar_login("111.111.111-11").await.expect("db");
        assert_eq!(resultado, Err(FalhaLogin::CpfNaoEncontrado));
        assert_eq!(FalhaLogin::CpfNaoEncontrado.to_string(), "CPF não encontrado.");
    }

    #[tokio::test]
    async fn athlete_and_unknown_roles_get_fixed_messages() {
        let repo = RepoFalso::default().com_usuario(caio()).com_usuario(Usuario::Desconhecido {
            cpf: "555".into(),
            nome: "Juiz".into(),
            tipo: "juiz".into(),
        });
        let controlador = ControladorSistema::new(&repo);

        let atleta = controlador.processar_login("987.654.321-00").await.expect("db");
        assert_eq!(atleta, Err(FalhaLogin::PainelAtletaNaoImplementado));
        assert_eq!(
            FalhaLogin::PainelAtletaNaoImplementado.to_string(),
            "Painel do Atleta ainda não implementado."
        );

        let outro = controlador.processar_login("555").await.expect("db");
        assert_eq!(outro, Err(FalhaLogin::TipoDesconhecido));
        assert_eq!(repo.consultas_eventos.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn panel_has_one_row_per_event_in_order() {
        let repo = RepoFalso::default()
            .com_usuario(Usuario::Organizador(olga()))
            .com_evento(7, "12345678900", "Corrida Antiga", "01/01/2000", 12)
            .com_evento(3, "12345678900", "Maratona Futura", "01/01/2099", 4)
            .com_evento(9, "00000000000", "De Outro", "01/01/2099", 99);
        let controlador = ControladorSistema::new(&repo);

        let painel = controlador
            .abrir_painel(&olga(), meio_dia(2024, 6, 15))
            .await
            .expect("painel");

        assert_eq!(painel.nome_organizador, "Olga Organizadora");
        assert_eq!(
            painel.linhas,
            vec![
                LinhaPainel {
                    evento_id: 7,
                    nome: "Corrida Antiga".into(),
                    data: "01/01/2000".into(),
                    inscritos: 12,
                    status: StatusEvento::Concluido,
                },
                LinhaPainel {
                    evento_id: 3,
                    nome: "Maratona Futura".into(),
                    data: "01/01/2099".into(),
                    inscritos: 4,
                    status: StatusEvento::InscricoesAbertas,
                },
            ]
        );
    }

    #[tokio::test]
    async fn rows_are_deterministic_for_fixed_time() {
        let repo = RepoFalso::default()
            .com_evento(1, "x", "A", "31/13/2024", 0)
            .com_evento(2, "x", "B", "not-a-date", 1)
            .com_evento(3, "x", "C", "20/06/2024", 2);
        let controlador = ControladorSistema::new(&repo);
        let eventos = repo.get_all_by_organizador("x").await.expect("eventos");

        let primeira = controlador.preparar_linhas_painel(&eventos, meio_dia(2024, 6, 15)).await.expect("linhas");
        let segunda = controlador.preparar_linhas_painel(&eventos, meio_dia(2024, 6, 15)).await.expect("linhas");
        assert_eq!(primeira, segunda);

        let estados: Vec<StatusEvento> = primeira.iter().map(|l| l.status).collect();
        assert_eq!(
            estados,
            vec![StatusEvento::DataInvalida, StatusEvento::DataInvalida, StatusEvento::InscricoesAbertas]
        );

        // Outro dia, outra leitura do mesmo evento
        let depois = controlador.preparar_linhas_painel(&eventos, meio_dia(2024, 6, 21)).await.expect("linhas");
        assert_eq!(depois[2].status, StatusEvento::Concluido);
    }

    #[tokio::test]
    async fn empty_event_list_gives_empty_panel() {
        let repo = RepoFalso::default();
        let painel = ControladorSistema::new(&repo)
            .abrir_painel(&olga(), meio_dia(2024, 6, 15))
            .await
            .expect("painel");
        assert!(painel.linhas.is_empty());
    }

    #[tokio::test]
    async fn manage_kits_without_selection_does_nothing() {
        let repo = RepoFalso::default().com_evento(1, "12345678900", "Maratona", "01/01/2099", 0);
        let controlador = ControladorSistema::new(&repo);

        for selecao in [None, Some(""), Some("  "), Some("primeira")] {
            let resultado = controlador.selecionar_evento_para_kits(&olga(), selecao).await.expect("db");
            assert_eq!(resultado, Err(FalhaPainel::NenhumEventoSelecionado));
        }
        assert_eq!(repo.consultas_eventos.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn selection_resolves_by_id_against_fresh_list() {
        let repo = RepoFalso::default()
            .com_evento(1, "12345678900", "Maratona", "01/01/2099", 0)
            .com_evento(2, "12345678900", "Triatlo", "01/01/2099", 0);
        let controlador = ControladorSistema::new(&repo);

        // Um evento novo aparece entre a renderização e o clique
        repo.eventos.lock().expect("lock").insert(
            0,
            Evento {
                id: 5,
                organizador_cpf: "12345678900".into(),
                nome: "Novo".into(),
                data: "01/01/2099".into(),
                local: String::new(),
            },
        );

        let evento = controlador
            .selecionar_evento_para_kits(&olga(), Some("2"))
            .await
            .expect("db")
            .expect("selecionado");
        assert_eq!((evento.id, evento.nome.as_str()), (2, "Triatlo"));
    }

    #[tokio::test]
    async fn vanished_or_foreign_event_is_reported() {
        let repo = RepoFalso::default().com_evento(9, "00000000000", "De Outro", "01/01/2099", 0);
        let controlador = ControladorSistema::new(&repo);

        let resultado = controlador.selecionar_evento_para_kits(&olga(), Some("9")).await.expect("db");
        assert_eq!(resultado, Err(FalhaPainel::EventoNaoEncontrado));
        let resultado = controlador.selecionar_evento_para_kits(&olga(), Some("42")).await.expect("db");
        assert_eq!(resultado, Err(FalhaPainel::EventoNaoEncontrado));
    }

    #[tokio::test]
    async fn session_organizer_must_still_be_an_organizer() {
        let repo = RepoFalso::default().com_usuario(Usuario::Organizador(olga())).com_usuario(caio());
        let controlador = ControladorSistema::new(&repo);

        assert_eq!(controlador.carregar_organizador("12345678900").await.expect("db"), Some(olga()));
        assert_eq!(controlador.carregar_organizador("98765432100").await.expect("db"), None);
        assert_eq!(controlador.carregar_organizador("000").await.expect("db"), None);
    }
}
