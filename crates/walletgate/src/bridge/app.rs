//! The page served at `/`.
//!
//! It connects to the injected wallet, reports the connection to the bridge,
//! and pumps `/api/provider/request` for EIP-1193 requests to execute against
//! `window.ethereum`, posting each result or error back.

pub(crate) const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang='en'>
<head>
  <meta charset='utf-8'>
  <title>walletgate bridge</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 4rem auto; }
    #walletAddress { color: #2d7d46; word-break: break-all; }
    #status { color: #666; }
  </style>
</head>
<body>
  <h1>walletgate bridge</h1>
  <p id='walletAddress'>No wallet connected.</p>
  <p id='status'>Waiting for requests.</p>
  <script>
    const POLL_MS = 500;
    const addressLabel = document.getElementById('walletAddress');
    const statusLabel = document.getElementById('status');

    async function api(path, body) {
      const options = body === undefined
        ? undefined
        : { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body) };
      const response = await fetch('/api' + path, options);
      return response.json();
    }

    async function reportConnection(accounts) {
      const chainIdHex = await window.ethereum.request({ method: 'eth_chainId' });
      const connection = { address: accounts[0], chainId: parseInt(chainIdHex, 16) };
      await api('/connection', connection);
      addressLabel.innerText = 'Connected: ' + accounts[0];
    }

    async function execute(request) {
      statusLabel.innerText = 'Executing ' + request.method;
      try {
        const result = await window.ethereum.request({
          method: request.method,
          params: request.params || [],
        });
        await api('/provider/response', { id: request.id, result: result === undefined ? null : result, error: null });
        if (request.method === 'eth_requestAccounts') {
          await reportConnection(result);
        }
      } catch (err) {
        await api('/provider/response', {
          id: request.id,
          result: null,
          error: { code: typeof err.code === 'number' ? err.code : -32603, message: err.message || String(err) },
        });
      }
      statusLabel.innerText = 'Waiting for requests.';
    }

    async function pump() {
      try {
        const body = await api('/provider/request');
        if (body.status === 'ok') {
          await execute(body.data);
        }
      } finally {
        setTimeout(pump, POLL_MS);
      }
    }

    if (window.ethereum) {
      pump();
    } else {
      statusLabel.innerText = 'No wallet extension detected. Please install one.';
    }
  </script>
</body>
</html>
"##;
