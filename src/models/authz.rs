// src/models/authz.rs

use serde_json::Value;

use crate::models::auth::User;

// Os papéis que participam da autorização do módulo de magazzino.
// Qualquer outra string vira `Altro` e NÃO é rebaixada para Reception:
// um papel desconhecido precisa falhar em `can_sell`, mas ainda cai no
// ramo de igualdade de `can_access_salon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Coordinator,
    Magazzino,
    Reception,
    Cliente,
    Altro(String),
}

impl Role {
    // Lê o claim `role` do perfil. Claim ausente (ou vazio) = menor
    // privilégio possível, ou seja, Reception.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(str::trim) {
            None | Some("") => Role::Reception,
            Some("coordinator") => Role::Coordinator,
            Some("magazzino") => Role::Magazzino,
            Some("reception") => Role::Reception,
            Some("cliente") => Role::Cliente,
            Some(other) => Role::Altro(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Coordinator => "coordinator",
            Role::Magazzino => "magazzino",
            Role::Reception => "reception",
            Role::Cliente => "cliente",
            Role::Altro(s) => s,
        }
    }

    // Visibilidade do módulo de magazzino como um todo. Propositalmente
    // mais permissivo que os predicados de operação: reception entra aqui
    // mesmo sem poder criar transferências.
    pub fn is_allowed_warehouse_role(&self) -> bool {
        matches!(self, Role::Coordinator | Role::Magazzino | Role::Reception)
    }
}

// Identificador de salão como soma explícita, em vez das duas convenções
// de inteiro cru que circulavam antes (5 = centrale no servidor, 0 =
// vista aggregata no cliente). A conversão acontece em exatamente dois
// pontos nomeados: `from_raw`/`as_raw` e `from_client`/`as_client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalonId {
    // Sede física, id de 1 a 4.
    Salone(u8),
    // Magazzino centrale / vista aggregata.
    Centrale,
}

// Id do magazzino centrale na convenção do servidor.
const CENTRALE_RAW: i64 = 5;
// Sentinela da vista aggregata na convenção do cliente.
const CENTRALE_CLIENT: i64 = 0;

impl SalonId {
    // Convenção do servidor: [1,5], onde 5 é o centrale.
    // Fora do intervalo = None, nunca "clampado".
    pub fn from_raw(n: i64) -> Option<Self> {
        match n {
            1..=4 => Some(SalonId::Salone(n as u8)),
            CENTRALE_RAW => Some(SalonId::Centrale),
            _ => None,
        }
    }

    // Leitura defensiva de um claim/payload JSON. Null, ausente e string
    // vazia são tratados uniformemente como "ausente"; strings não
    // numéricas, floats não inteiros, NaN e negativos também viram None.
    // Nunca entra em pânico.
    pub fn from_claim(value: Option<&Value>) -> Option<Self> {
        let value = value?;
        let n = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i
                } else {
                    let f = n.as_f64()?;
                    if !f.is_finite() || f.fract() != 0.0 {
                        return None;
                    }
                    f as i64
                }
            }
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<i64>().ok()?
            }
            _ => return None,
        };
        Self::from_raw(n)
    }

    // Convenção do cliente: 0 = vista aggregata/centrale.
    pub fn from_client(n: i64) -> Option<Self> {
        match n {
            CENTRALE_CLIENT => Some(SalonId::Centrale),
            1..=4 => Some(SalonId::Salone(n as u8)),
            _ => None,
        }
    }

    // Verdadeiro apenas para as sedes físicas {1,2,3,4}.
    pub fn is_real(&self) -> bool {
        matches!(self, SalonId::Salone(_))
    }

    pub fn as_raw(&self) -> i16 {
        match self {
            SalonId::Salone(n) => *n as i16,
            SalonId::Centrale => CENTRALE_RAW as i16,
        }
    }

    pub fn as_client(&self) -> i64 {
        match self {
            SalonId::Salone(n) => *n as i64,
            SalonId::Centrale => CENTRALE_CLIENT,
        }
    }

    // Todos os ids válidos na convenção do servidor.
    pub fn all() -> [SalonId; 5] {
        [
            SalonId::Salone(1),
            SalonId::Salone(2),
            SalonId::Salone(3),
            SalonId::Salone(4),
            SalonId::Centrale,
        ]
    }
}

// View-model derivado (nunca persistido) com tudo que a autorização
// precisa saber sobre o usuário da requisição. É construído uma única
// vez, na fronteira de autenticação; os handlers nunca mexem no registro
// cru do usuário.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccess {
    pub role: Role,
    pub salon: Option<SalonId>,
}

impl UserAccess {
    // O único ponto de extração defensiva dos claims do usuário.
    pub fn from_user(user: &User) -> Self {
        UserAccess {
            role: Role::from_claim(user.role.as_deref()),
            salon: user.salon_id.and_then(|n| SalonId::from_raw(n as i64)),
        }
    }

    // Coordinator e magazzino acessam qualquer salão; todos os outros
    // papéis caem na comparação estrita com o próprio salão (sem salão
    // atribuído = negado).
    pub fn can_access_salon(&self, target: SalonId) -> bool {
        match self.role {
            Role::Coordinator | Role::Magazzino => true,
            _ => self.salon == Some(target),
        }
    }

    pub fn can_create_transfer(&self) -> bool {
        matches!(self.role, Role::Coordinator | Role::Magazzino)
    }

    // Separação de funções: a venda é registrada só pela reception.
    // Coordinator e magazzino ficam de fora de propósito.
    pub fn can_sell(&self) -> bool {
        matches!(self.role, Role::Reception)
    }

    // Trocar o salão ativo é uma mutação privilegiada; checagem separada
    // de `can_create_transfer` mesmo cobrindo hoje os mesmos papéis.
    pub fn can_switch_salon(&self) -> bool {
        matches!(self.role, Role::Coordinator | Role::Magazzino)
    }

    // O conjunto de salões em que o usuário pode operar.
    pub fn allowed_salons(&self) -> Vec<SalonId> {
        match self.role {
            Role::Coordinator | Role::Magazzino => SalonId::all().to_vec(),
            _ => self.salon.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn access(role: &str, salon: Option<i16>) -> UserAccess {
        UserAccess {
            role: Role::from_claim(Some(role)),
            salon: salon.and_then(|n| SalonId::from_raw(n as i64)),
        }
    }

    #[test]
    fn from_raw_accepts_only_one_to_five() {
        for n in 1..=4 {
            assert_eq!(SalonId::from_raw(n), Some(SalonId::Salone(n as u8)));
        }
        assert_eq!(SalonId::from_raw(5), Some(SalonId::Centrale));
        for n in [0, 6, -1, 42, i64::MIN] {
            assert_eq!(SalonId::from_raw(n), None);
        }
    }

    #[test]
    fn from_claim_handles_absent_and_malformed_values() {
        assert_eq!(SalonId::from_claim(None), None);
        assert_eq!(SalonId::from_claim(Some(&Value::Null)), None);
        assert_eq!(SalonId::from_claim(Some(&json!(""))), None);
        assert_eq!(SalonId::from_claim(Some(&json!("  "))), None);
        assert_eq!(SalonId::from_claim(Some(&json!("abc"))), None);
        assert_eq!(SalonId::from_claim(Some(&json!("2.5"))), None);
        assert_eq!(SalonId::from_claim(Some(&json!(2.5))), None);
        assert_eq!(SalonId::from_claim(Some(&json!(-3))), None);
        assert_eq!(SalonId::from_claim(Some(&json!(true))), None);
        assert_eq!(SalonId::from_claim(Some(&json!([1]))), None);

        assert_eq!(SalonId::from_claim(Some(&json!(3))), Some(SalonId::Salone(3)));
        assert_eq!(SalonId::from_claim(Some(&json!("5"))), Some(SalonId::Centrale));
        assert_eq!(SalonId::from_claim(Some(&json!(2.0))), Some(SalonId::Salone(2)));
    }

    #[test]
    fn is_real_excludes_centrale() {
        for n in 1..=4 {
            assert!(SalonId::from_raw(n).unwrap().is_real());
        }
        assert!(!SalonId::Centrale.is_real());
        assert_eq!(SalonId::from_raw(0), None);
    }

    #[test]
    fn client_convention_round_trip() {
        assert_eq!(SalonId::from_client(0), Some(SalonId::Centrale));
        assert_eq!(SalonId::Centrale.as_client(), 0);
        assert_eq!(SalonId::Centrale.as_raw(), 5);
        assert_eq!(SalonId::from_client(3), Some(SalonId::Salone(3)));
        assert_eq!(SalonId::from_client(5), None);
        assert_eq!(SalonId::from_client(-1), None);
    }

    #[test]
    fn role_from_claim_defaults_to_reception_only_when_absent() {
        assert_eq!(Role::from_claim(None), Role::Reception);
        assert_eq!(Role::from_claim(Some("")), Role::Reception);
        assert_eq!(Role::from_claim(Some("coordinator")), Role::Coordinator);
        assert_eq!(Role::from_claim(Some("cliente")), Role::Cliente);
        assert_eq!(
            Role::from_claim(Some("stagista")),
            Role::Altro("stagista".to_string())
        );
    }

    #[test]
    fn coordinator_and_magazzino_access_every_salon() {
        for role in ["coordinator", "magazzino"] {
            let a = access(role, None);
            for salon in SalonId::all() {
                assert!(a.can_access_salon(salon), "{role} deve acessar {salon:?}");
            }
        }
    }

    #[test]
    fn reception_accesses_only_its_own_salon() {
        let a = access("reception", Some(2));
        assert!(a.can_access_salon(SalonId::Salone(2)));
        assert!(!a.can_access_salon(SalonId::Salone(3)));
        assert!(!a.can_access_salon(SalonId::Centrale));

        // Reception sem salão atribuído não acessa nada.
        let orphan = access("reception", None);
        for salon in SalonId::all() {
            assert!(!orphan.can_access_salon(salon));
        }
    }

    #[test]
    fn unknown_role_falls_through_to_equality_check() {
        // Papel desconhecido com claim de salão: passa no acesso por
        // igualdade, mas continua sem vender e sem transferir.
        let a = access("stagista", Some(1));
        assert!(a.can_access_salon(SalonId::Salone(1)));
        assert!(!a.can_access_salon(SalonId::Salone(2)));
        assert!(!a.can_sell());
        assert!(!a.can_create_transfer());
    }

    #[test]
    fn transfer_is_coordinator_and_magazzino_only() {
        assert!(access("coordinator", None).can_create_transfer());
        assert!(access("magazzino", None).can_create_transfer());
        assert!(!access("reception", Some(1)).can_create_transfer());
        assert!(!access("cliente", None).can_create_transfer());
        assert!(!access("stagista", None).can_create_transfer());
        assert!(
            !UserAccess { role: Role::from_claim(None), salon: None }.can_create_transfer()
        );
    }

    #[test]
    fn sell_is_reception_only() {
        assert!(access("reception", Some(1)).can_sell());
        assert!(!access("coordinator", None).can_sell());
        assert!(!access("magazzino", None).can_sell());
        assert!(!access("cliente", None).can_sell());
        assert!(!access("stagista", None).can_sell());
    }

    #[test]
    fn switch_salon_is_coordinator_and_magazzino_only() {
        assert!(access("coordinator", None).can_switch_salon());
        assert!(access("magazzino", Some(2)).can_switch_salon());
        assert!(!access("reception", Some(1)).can_switch_salon());
        assert!(!access("cliente", None).can_switch_salon());
        assert!(!access("stagista", Some(1)).can_switch_salon());
    }

    #[test]
    fn warehouse_visibility_excludes_only_cliente_and_unknown() {
        assert!(Role::Coordinator.is_allowed_warehouse_role());
        assert!(Role::Magazzino.is_allowed_warehouse_role());
        assert!(Role::Reception.is_allowed_warehouse_role());
        assert!(!Role::Cliente.is_allowed_warehouse_role());
        assert!(!Role::Altro("stagista".into()).is_allowed_warehouse_role());
    }

    #[test]
    fn allowed_salons_matches_role_scope() {
        assert_eq!(access("coordinator", None).allowed_salons().len(), 5);
        assert_eq!(
            access("reception", Some(4)).allowed_salons(),
            vec![SalonId::Salone(4)]
        );
        assert!(access("cliente", None).allowed_salons().is_empty());
    }
}
