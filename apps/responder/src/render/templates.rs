//! Page markup. Rendered by Handlebars, so every `{{value}}` is HTML-escaped.
//!
//! The answer is written with no surrounding whitespace so the copy button's
//! `textContent` is exactly the completion text.

pub const PAGE: &str = "page";

pub const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
  h1 { text-align: center; color: #fc5757; }
  label { display: block; margin-top: 1rem; }
  input, textarea { width: 100%; box-sizing: border-box; padding: .5rem; }
  textarea { resize: none; }
  [aria-invalid="true"] { border: 2px solid #d93526; }
  [aria-invalid="false"] { border: 2px solid #398712; }
  .error { color: #d93526; display: block; }
  .choices { display: flex; justify-content: center; gap: 2.5rem; }
  .choices label { display: flex; gap: .5rem; align-items: center; }
  .choices input { width: auto; }
  .actions { display: flex; justify-content: center; gap: 1rem; margin-top: 1rem; }
  button { background: #fc5757; color: #fff; border: none; padding: .5rem 1rem; text-transform: uppercase; }
  #answer { border: 2px solid #4b5563; border-radius: .5rem; padding: .5rem; white-space: pre-line; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<p>Tu en as marre d'écrire tes messages pour répondre aux appels d'offres <strong>Malt</strong> ? Tu es au bon endroit !</p>
<p>Il te suffit de remplir le formulaire ci-dessous et de copier la réponse ainsi générée.</p>

<form method="post" action="/">
  <label for="name">Nom
    <input id="name" name="name" data-field="name" placeholder="Nom" value="{{fields.name.value}}" aria-invalid="{{fields.name.aria_invalid}}">
  </label>
  {{#if fields.name.invalid}}<small class="error">{{fields.name.message}}</small>{{/if}}

  <label for="tel">Téléphone <em>(optionnel)</em>
    <input id="tel" name="tel" type="tel" data-field="tel" placeholder="Téléphone" value="{{fields.tel.value}}" aria-invalid="{{fields.tel.aria_invalid}}">
  </label>
  {{#if fields.tel.invalid}}<small class="error">{{fields.tel.message}}</small>{{/if}}

  <label for="api_key">API Key
    <input id="api_key" name="api_key" type="password" data-field="api_key" placeholder="API Key" value="{{fields.api_key.value}}" aria-invalid="{{fields.api_key.aria_invalid}}">
  </label>
  {{#if fields.api_key.invalid}}<small class="error">{{fields.api_key.message}}</small>{{/if}}

  <fieldset>
    <p>Type de réponse</p>
    <div class="choices">
      <label for="Devis"><input id="Devis" type="radio" name="offer_type" value="Devis" data-field="offer_type" aria-invalid="{{fields.offer_type.aria_invalid}}"{{#if quote_checked}} checked{{/if}}>Devis</label>
      <label for="Appel"><input id="Appel" type="radio" name="offer_type" value="Appel" data-field="offer_type" aria-invalid="{{fields.offer_type.aria_invalid}}"{{#if call_checked}} checked{{/if}}>Appel</label>
    </div>
    {{#if fields.offer_type.invalid}}<small class="error">{{fields.offer_type.message}}</small>{{/if}}
  </fieldset>

  <label for="offer">Appel d'offre (150 caractères minimum)
    <textarea id="offer" name="offer" data-field="offer" rows="5" aria-invalid="{{fields.offer.aria_invalid}}">
{{fields.offer.value}}</textarea>
  </label>
  {{#if fields.offer.invalid}}<small class="error">{{fields.offer.message}}</small>{{/if}}

  <div class="actions">
    <button type="submit">Générer</button>
    <button type="submit" formaction="/reset">Réinitialiser</button>
  </div>
</form>

{{#if answer}}
<section>
  <h2>Réponse</h2>
  <div id="answer">{{answer}}</div>
  <div class="actions"><button id="copy" type="button">Copier</button></div>
</section>
{{/if}}

<script>
  document.querySelectorAll("[data-field]").forEach(function (el) {
    el.addEventListener("input", function () {
      var key = el.dataset.field;
      fetch("/api/form/fields/" + key, {
        method: "PUT",
        headers: { "content-type": "application/json" },
        body: JSON.stringify({ value: el.value })
      })
        .then(function (r) { return r.json(); })
        .then(function (v) {
          document.querySelectorAll('[data-field="' + key + '"]').forEach(function (t) {
            t.setAttribute("aria-invalid", v.aria_invalid);
          });
        })
        .catch(function (e) { console.error(e); });
    });
  });
  var copy = document.getElementById("copy");
  if (copy) {
    copy.addEventListener("click", function () {
      navigator.clipboard.writeText(document.getElementById("answer").textContent);
    });
  }
</script>
</body>
</html>
"##;
