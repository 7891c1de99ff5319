// Prompt fragments for the offer reply. The generated reply is in French,
// so every fragment is too.

/// Opens the prompt; the offer text follows `OFFER_LABEL`.
pub const PREAMBLE: &str = "J'ai reçu une offre de travail que je souhaite que tu analyses \
    et auxquelles tu répondes. Voici les détails :";

pub const OFFER_LABEL: &str = "Offre : ";

pub const IDENTITY_HEADER: &str = "Voici aussi des informations sur moi :";

pub const NAME_LABEL: &str = "Mon nom : ";

pub const PHONE_LABEL: &str = "Numéro de téléphone pour la communication : ";

/// Stands in for the phone number when the sender left it empty.
pub const PHONE_PLACEHOLDER: &str = "Non renseigné";

pub const REPLY_INSTRUCTIONS: &str = "S'il te plaît, élabore une réponse professionnelle et \
    engageante, en montrant de l'intérêt pour le projet, en partageant mes compétences et mon \
    expérience pertinentes, en posant des questions pour mieux comprendre le projet.
Utilise mes informations en fin de réponse seulement. Tu peux commencer en lui disant bonjour \
    et en le remerciant pour son offre.
Ensuite, tu peux lui dire que tu es intéressé par son offre et que tu ";

/// Closing clause for `ResponseType::Quote`.
pub const QUOTE_CLAUSE: &str =
    "Propose lui d'établir directement un devis si mon profil lui convient.";

/// Closing clause for `ResponseType::Call`.
pub const CALL_CLAUSE: &str = "Propose lui un appel en lui indiquant mon numéro de téléphone \
    afin d'obtenir plus de renseignement. Donne-lui également deux disponibilités pour un \
    rendez-vous.";
